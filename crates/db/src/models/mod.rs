//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` input DTO for register and update
//! - A listing filter and, where the listing embeds related records, a list
//!   item type carrying the joined summaries
//!
//! API payloads use camelCase field names.

pub mod alert;
pub mod camera;
pub mod detection;
pub mod entrance;
pub mod user;

/// Serde default for `isActive`-style flags that start out enabled.
pub(crate) fn default_true() -> bool {
    true
}

/// Deserialize a string with surrounding whitespace removed.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

/// Like [`trimmed`], for optional fields. Pair with `#[serde(default)]`.
pub fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(raw.map(|s| s.trim().to_string()))
}
