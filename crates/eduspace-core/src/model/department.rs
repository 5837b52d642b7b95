use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, EntityKind, Field};
use crate::requests::{CreateDepartmentRequest, UpdateDepartmentRequest};
use crate::store::{DataStore, EntityCollection};

/// An academic department. Students and teachers point at it by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: EntityId,
    pub name: String,
    pub code: String,
    pub description: String,
}

impl Entity for Department {
    type Create = CreateDepartmentRequest;
    type Update = UpdateDepartmentRequest;

    const KIND: EntityKind = EntityKind::Department;
    const SEARCH_FIELDS: &'static [Field] =
        &[Field::Id, Field::Name, Field::Code, Field::Description];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_request(id: EntityId, request: CreateDepartmentRequest) -> Self {
        Self {
            id,
            name: request.name,
            code: request.code,
            description: request.description,
        }
    }

    fn apply(&mut self, update: UpdateDepartmentRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }

    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Id => Some(self.id.as_str()),
            Field::Name => Some(&self.name),
            Field::Code => Some(&self.code),
            Field::Description => Some(&self.description),
            _ => None,
        }
    }

    fn collection(store: &DataStore) -> &EntityCollection<Self> {
        &store.departments
    }
}
