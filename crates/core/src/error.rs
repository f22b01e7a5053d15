use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with {field} {value} not found")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The record exists but is in the wrong lifecycle state for the
    /// requested operation (e.g. restoring a user that is not deleted).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Not-found error for a lookup by primary key.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Not-found error for a lookup by some other unique field.
    pub fn not_found_by(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_by_id_message() {
        let err = CoreError::not_found("Alert", 7);
        assert_eq!(err.to_string(), "Alert with id 7 not found");
    }

    #[test]
    fn not_found_by_field_message() {
        let err = CoreError::not_found_by("User", "email", "a@b.co");
        assert_eq!(err.to_string(), "User with email a@b.co not found");
    }
}
