use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::EntityId;

/// Role of an authenticated principal. Carried for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// An authenticated principal, as returned by login and register.
///
/// The credential never leaves the store, so it has no field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Role,
}
