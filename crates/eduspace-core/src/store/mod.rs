// ── In-memory data store ──
//
// The single owner of every record. Synchronous and lock-free; latency
// and the async surface live in `backend`.

mod collection;
mod data_store;
mod seed;

pub use collection::EntityCollection;
pub use data_store::DataStore;
