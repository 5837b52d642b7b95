use indexmap::IndexMap;

use crate::model::{Entity, Field};

/// Editable text values for a modal, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    values: IndexMap<Field, String>,
}

impl Form {
    /// Every field present and empty.
    pub fn blank(fields: &[Field]) -> Self {
        Self {
            values: fields.iter().map(|f| (*f, String::new())).collect(),
        }
    }

    /// Pre-filled with the record's exact values.
    pub fn from_record<E: Entity>(record: &E, fields: &[Field]) -> Self {
        Self {
            values: fields
                .iter()
                .map(|f| (*f, record.value(*f).unwrap_or_default().to_owned()))
                .collect(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn value_mut(&mut self, field: Field) -> Option<&mut String> {
        self.values.get_mut(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First of `required` whose value is blank.
    pub fn first_missing(&self, required: &[Field]) -> Option<Field> {
        required
            .iter()
            .copied()
            .find(|f| self.get(*f).trim().is_empty())
    }

    /// Owned copy of a value, as request builders need it.
    pub(crate) fn take(&self, field: Field) -> String {
        self.get(field).to_owned()
    }
}
