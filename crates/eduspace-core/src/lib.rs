// eduspace-core: records, facade and headless view logic for the EduSpace console.

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod join;
pub mod model;
pub mod navigation;
pub mod notify;
pub mod requests;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{Backend, MemoryBackend};
pub use config::{ConsoleConfig, LatencyConfig};
pub use context::AppContext;
pub use error::CoreError;
pub use join::{UNKNOWN_DEPARTMENT, ViewRow};
pub use navigation::{AuthPage, Navigator, Route, Session, Transition, ViewKind};
pub use notify::{Notification, NotificationCenter, Notifier, Severity};
pub use requests::*;
pub use store::DataStore;

// Re-export model types at the crate root for ergonomics.
pub use model::{Department, Entity, EntityId, EntityKind, Field, Role, Student, Teacher, User};
