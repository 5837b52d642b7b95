// ── Cross-entity join ──
//
// Attaches the owning department's display name to student and teacher
// rows. Pure and linear: one pass to index the departments, one pass to
// annotate the records. A dangling reference resolves to the sentinel.

use std::collections::HashMap;

use crate::model::{Department, Entity, EntityId, Field};

/// Display name for a reference to a department that does not exist.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// `department id -> name` lookup, built once per load.
#[derive(Debug, Clone, Default)]
pub struct DepartmentIndex {
    names: HashMap<EntityId, String>,
}

impl DepartmentIndex {
    pub fn new(departments: &[Department]) -> Self {
        let names = departments
            .iter()
            .map(|d| (d.id.clone(), d.name.clone()))
            .collect();
        Self { names }
    }

    pub fn name_of(&self, id: &EntityId) -> &str {
        self.names.get(id).map_or(UNKNOWN_DEPARTMENT, String::as_str)
    }
}

/// A record as a view displays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow<E> {
    pub record: E,
    /// Resolved department name; `None` for kinds with no department.
    pub department_name: Option<String>,
}

impl<E: Entity> ViewRow<E> {
    /// Display text for `field`. The department column shows the
    /// resolved name rather than the raw id.
    pub fn cell(&self, field: Field) -> &str {
        match (field, &self.department_name) {
            (Field::Department, Some(name)) => name.as_str(),
            _ => self.record.value(field).unwrap_or_default(),
        }
    }

    /// Every value a free-text query is matched against.
    pub fn search_values(&self) -> impl Iterator<Item = &str> {
        E::SEARCH_FIELDS
            .iter()
            .filter_map(|f| self.record.value(*f))
            .chain(self.department_name.as_deref())
    }
}

/// Pair each record with its department's name.
pub fn annotate<E: Entity>(records: Vec<E>, departments: &[Department]) -> Vec<ViewRow<E>> {
    let index = DepartmentIndex::new(departments);
    records
        .into_iter()
        .map(|record| {
            let department_name = record
                .department_id()
                .map(|id| index.name_of(id).to_owned());
            ViewRow {
                record,
                department_name,
            }
        })
        .collect()
}
