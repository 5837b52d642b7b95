use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, EntityKind, Field};
use crate::requests::{CreateStudentRequest, UpdateStudentRequest};
use crate::store::{DataStore, EntityCollection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Soft reference; the department may no longer exist.
    pub department_id: EntityId,
    /// Kept exactly as entered (`YYYY-MM-DD` in the demo data).
    pub enrollment_date: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Student {
    type Create = CreateStudentRequest;
    type Update = UpdateStudentRequest;

    const KIND: EntityKind = EntityKind::Student;
    const SEARCH_FIELDS: &'static [Field] = &[
        Field::Id,
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::EnrollmentDate,
    ];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn department_id(&self) -> Option<&EntityId> {
        Some(&self.department_id)
    }

    fn from_request(id: EntityId, request: CreateStudentRequest) -> Self {
        Self {
            id,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            department_id: request.department_id,
            enrollment_date: request.enrollment_date,
        }
    }

    fn apply(&mut self, update: UpdateStudentRequest) {
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
        if let Some(v) = update.enrollment_date {
            self.enrollment_date = v;
        }
    }

    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Id => Some(self.id.as_str()),
            Field::FirstName => Some(&self.first_name),
            Field::LastName => Some(&self.last_name),
            Field::Email => Some(&self.email),
            Field::Department => Some(self.department_id.as_str()),
            Field::EnrollmentDate => Some(&self.enrollment_date),
            _ => None,
        }
    }

    fn collection(store: &DataStore) -> &EntityCollection<Self> {
        &store.students
    }
}
