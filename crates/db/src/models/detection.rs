//! Detection entity model and DTOs.

use crowdwatch_core::listing::DeletedFilter;
use crowdwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::camera::CameraSummary;
use crate::models::entrance::EntranceSummary;

/// A detection row from the `detections` table.
///
/// Detections arrive already computed; `count` and `density` are stored as
/// reported and `image_snapshot` is an opaque reference.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub id: DbId,
    pub camera_id: DbId,
    pub entrance_id: DbId,
    pub count: i32,
    pub timestamp: Timestamp,
    pub image_snapshot: Option<String>,
    pub density: Option<f64>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Newest detection embedded in camera listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LatestDetection {
    pub id: DbId,
    pub count: i32,
    pub density: Option<f64>,
    pub image_snapshot: Option<String>,
    pub timestamp: Timestamp,
    pub entrance_id: DbId,
}

/// Detection listing row: the detection plus its camera and entrance.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub detection: Detection,
    pub camera: Option<Json<CameraSummary>>,
    pub entrance: Option<Json<EntranceSummary>>,
}

/// Full field set for registering a detection or replacing one wholesale.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DetectionInput {
    pub camera_id: DbId,
    pub entrance_id: DbId,
    #[validate(range(min = 0, message = "Count must be non-negative"))]
    pub count: i32,
    /// On insert defaults to now; on update an omitted value keeps the stored one.
    pub timestamp: Option<Timestamp>,
    pub image_snapshot: Option<String>,
    pub density: Option<f64>,
}

/// Filters accepted by the detection listing.
#[derive(Debug, Clone, Default)]
pub struct DetectionFilter {
    pub camera_id: Option<DbId>,
    pub entrance_id: Option<DbId>,
    pub deleted: DeletedFilter,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn negative_count_is_rejected() {
        let input: DetectionInput = serde_json::from_value(json!({
            "cameraId": 1,
            "entranceId": 2,
            "count": -1
        }))
        .unwrap();
        assert!(input.validate().unwrap_err().field_errors().contains_key("count"));
    }

    #[test]
    fn timestamp_is_optional() {
        let input: DetectionInput = serde_json::from_value(json!({
            "cameraId": 1,
            "entranceId": 2,
            "count": 0,
            "density": 0.4
        }))
        .unwrap();
        assert!(input.timestamp.is_none());
        assert!(input.validate().is_ok());
    }
}
