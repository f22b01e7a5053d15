//! Query-string filter policy shared by every listing.
//!
//! Listing parameters arrive as raw strings. The helpers here turn them into
//! typed filters so each resource applies exactly the same rules.

use crate::error::CoreError;
use crate::types::DbId;

/// Which side of the soft-delete line a listing selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletedFilter {
    /// Rows whose `is_deleted` is false or absent (legacy rows).
    #[default]
    Active,
    /// Only rows explicitly marked deleted.
    OnlyDeleted,
}

impl DeletedFilter {
    /// `"true"` selects deleted rows; anything else (including absence)
    /// selects live rows.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("true") => Self::OnlyDeleted,
            _ => Self::Active,
        }
    }

    /// SQL predicate over the given `is_deleted` column expression.
    pub fn predicate(self, column: &str) -> String {
        match self {
            Self::Active => format!("({column} = false OR {column} IS NULL)"),
            Self::OnlyDeleted => format!("{column} = true"),
        }
    }
}

/// Boolean filter that applies whenever the parameter is present.
///
/// The filter value is `true` only for the literal `"true"`; any other value
/// filters on `false`.
pub fn flag_if_present(value: Option<&str>) -> Option<bool> {
    value.map(|v| v == "true")
}

/// Boolean filter that applies only when the parameter is non-empty.
pub fn flag_if_non_empty(value: Option<&str>) -> Option<bool> {
    value.filter(|v| !v.is_empty()).map(|v| v == "true")
}

/// Free-text filter; blank values are ignored.
pub fn text_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse an identifier filter such as `entranceId`.
///
/// Empty values mean "no filter". Values that are not identifiers are a
/// validation failure rather than silently matching nothing.
pub fn id_filter(name: &str, value: Option<&str>) -> Result<Option<DbId>, CoreError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<DbId>()
            .map(Some)
            .map_err(|_| CoreError::Validation(format!("{name} must be a valid identifier"))),
    }
}
