//! Camera entity model and DTOs.

use crowdwatch_core::listing::DeletedFilter;
use crowdwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::detection::LatestDetection;
use crate::models::entrance::EntranceSummary;

/// Region of interest expressed as two counting lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Roi {
    #[serde(rename = "L1")]
    pub l1: Option<f64>,
    #[serde(rename = "L2")]
    pub l2: Option<f64>,
}

/// Geographic position of a camera. Coordinates are kept as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// A camera row from the `cameras` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: DbId,
    pub entrance_id: DbId,
    pub device_id: String,
    pub name: String,
    pub stream_url: Option<String>,
    pub roi: Option<Json<Roi>>,
    pub is_active: bool,
    pub ip_address: Option<String>,
    pub location: Option<Json<Location>>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Camera fields embedded in detection listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CameraSummary {
    pub id: DbId,
    pub device_id: String,
    pub name: String,
    pub stream_url: Option<String>,
    pub roi: Option<Roi>,
    pub is_active: bool,
    pub ip_address: Option<String>,
    pub location: Option<Location>,
}

/// Camera listing row: the camera plus its entrance and newest detection.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub camera: Camera,
    pub entrance: Option<Json<EntranceSummary>>,
    pub latest_detection: Option<Json<LatestDetection>>,
}

/// Full field set for registering a camera or replacing one wholesale.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CameraInput {
    pub entrance_id: DbId,
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(length(min = 1, message = "Device id is required"))]
    pub device_id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub stream_url: Option<String>,
    pub roi: Option<Roi>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    pub ip_address: Option<String>,
    pub location: Option<Location>,
}

/// Filters accepted by the camera listing.
#[derive(Debug, Clone, Default)]
pub struct CameraFilter {
    pub entrance_id: Option<DbId>,
    pub is_active: Option<bool>,
    pub deleted: DeletedFilter,
}

/// Entrance name embedded in the public camera listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntranceName {
    pub id: DbId,
    pub name: String,
}

/// Public projection of an active camera: where it is and what it watches.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraLocation {
    pub id: DbId,
    pub name: String,
    pub location: Option<Json<Location>>,
    pub entrance: Option<Json<EntranceName>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn roi_uses_uppercase_line_keys() {
        let roi: Roi = serde_json::from_value(json!({"L1": 0.25, "L2": 0.75})).unwrap();
        assert_eq!(roi.l1, Some(0.25));
        assert_eq!(serde_json::to_value(&roi).unwrap(), json!({"L1": 0.25, "L2": 0.75}));
    }

    #[test]
    fn input_defaults_active_and_trims_device_id() {
        let input: CameraInput = serde_json::from_value(json!({
            "entranceId": 3,
            "deviceId": "  cam-01 ",
            "name": "Gate A"
        }))
        .unwrap();
        assert!(input.is_active);
        assert_eq!(input.device_id, "cam-01");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn blank_device_id_fails_validation() {
        let input: CameraInput = serde_json::from_value(json!({
            "entranceId": 3,
            "deviceId": "   ",
            "name": "Gate A"
        }))
        .unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("device_id"));
    }
}
