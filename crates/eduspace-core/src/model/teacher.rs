use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, EntityKind, Field};
use crate::requests::{CreateTeacherRequest, UpdateTeacherRequest};
use crate::store::{DataStore, EntityCollection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Soft reference; the department may no longer exist.
    pub department_id: EntityId,
    pub specialization: String,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Teacher {
    type Create = CreateTeacherRequest;
    type Update = UpdateTeacherRequest;

    const KIND: EntityKind = EntityKind::Teacher;
    const SEARCH_FIELDS: &'static [Field] = &[
        Field::Id,
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Specialization,
    ];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn department_id(&self) -> Option<&EntityId> {
        Some(&self.department_id)
    }

    fn from_request(id: EntityId, request: CreateTeacherRequest) -> Self {
        Self {
            id,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            department_id: request.department_id,
            specialization: request.specialization,
        }
    }

    fn apply(&mut self, update: UpdateTeacherRequest) {
        if let Some(v) = update.first_name {
            self.first_name = v;
        }
        if let Some(v) = update.last_name {
            self.last_name = v;
        }
        if let Some(v) = update.email {
            self.email = v;
        }
        if let Some(v) = update.department_id {
            self.department_id = v;
        }
        if let Some(v) = update.specialization {
            self.specialization = v;
        }
    }

    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Id => Some(self.id.as_str()),
            Field::FirstName => Some(&self.first_name),
            Field::LastName => Some(&self.last_name),
            Field::Email => Some(&self.email),
            Field::Department => Some(self.department_id.as_str()),
            Field::Specialization => Some(&self.specialization),
            _ => None,
        }
    }

    fn collection(store: &DataStore) -> &EntityCollection<Self> {
        &store.teachers
    }
}
