// ── Domain model ──
//
// Records owned by the store, and the `Entity` trait that lets the
// store, the facade and the controllers treat them generically.

mod department;
mod entity_id;
mod field;
mod student;
mod teacher;
mod user;

use std::fmt;

use strum::Display;

pub use department::Department;
pub use entity_id::EntityId;
pub use field::Field;
pub use student::Student;
pub use teacher::Teacher;
pub use user::{Role, User};

use crate::store::{DataStore, EntityCollection};

/// The three record kinds the console manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EntityKind {
    Department,
    Student,
    Teacher,
}

impl EntityKind {
    /// Lowercase plural, as used in "Failed to load students".
    pub fn plural(self) -> &'static str {
        match self {
            Self::Department => "departments",
            Self::Student => "students",
            Self::Teacher => "teachers",
        }
    }
}

/// A record stored in one collection of the [`DataStore`].
pub trait Entity: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Every field except the id; consumed by `create`.
    type Create: Clone + fmt::Debug + Send + Sync + 'static;
    /// Every field optional; consumed by `update` as a shallow merge.
    type Update: Clone + fmt::Debug + Default + Send + Sync + 'static;

    const KIND: EntityKind;

    /// Fields a free-text query is matched against, besides the joined
    /// department name.
    const SEARCH_FIELDS: &'static [Field];

    fn id(&self) -> &EntityId;

    /// Soft reference to the owning department, for affiliated kinds.
    fn department_id(&self) -> Option<&EntityId> {
        None
    }

    fn from_request(id: EntityId, request: Self::Create) -> Self;

    /// Overwrite the fields present in `update`, leave the rest untouched.
    fn apply(&mut self, update: Self::Update);

    /// Raw value of a field, `None` when the kind has no such field.
    fn value(&self, field: Field) -> Option<&str>;

    #[doc(hidden)]
    fn collection(store: &DataStore) -> &EntityCollection<Self>;
}
