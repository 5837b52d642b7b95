// ── Core error types ──
//
// Every failure a facade call or a controller can surface. Controllers
// never let these escape: they are caught at the view boundary and
// turned into error notifications.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Auth errors ──────────────────────────────────────────────────
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {email}")]
    DuplicateUser { email: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    /// Raised client-side, before any facade call is made.
    #[error("{message}")]
    ValidationFailed { message: String },

    /// Anything a backend reports that has no more specific variant.
    #[error("{message}")]
    OperationFailed { message: String },
}

impl CoreError {
    pub(crate) fn not_found(entity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    pub fn operation(message: impl Into<String>) -> Self {
        Self::OperationFailed {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_kind_and_id() {
        let err = CoreError::not_found("Student", "42");
        assert_eq!(err.to_string(), "Student not found: 42");
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = CoreError::validation("Email is required");
        assert_eq!(err.to_string(), "Email is required");
    }
}
