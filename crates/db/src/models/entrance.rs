//! Entrance entity model and DTOs.

use crowdwatch_core::listing::DeletedFilter;
use crowdwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An entrance row from the `entrances` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entrance {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub threshold_medium: Option<f64>,
    pub threshold_high: Option<f64>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Entrance fields embedded in alert, camera, and detection listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntranceSummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub threshold_medium: Option<f64>,
    pub threshold_high: Option<f64>,
    pub is_active: bool,
}

/// Full field set for registering an entrance or replacing one wholesale.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EntranceInput {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: Option<String>,
    pub threshold_medium: Option<f64>,
    pub threshold_high: Option<f64>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
}

/// Filters accepted by the entrance listing.
#[derive(Debug, Clone, Default)]
pub struct EntranceFilter {
    pub deleted: DeletedFilter,
}
