//! Alert entity model and DTOs.

use crowdwatch_core::alert::Severity;
use crowdwatch_core::listing::DeletedFilter;
use crowdwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::entrance::EntranceSummary;

/// An alert row from the `alerts` table.
///
/// `severity` is constrained to the [`Severity`] names by `ck_alerts_severity`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: DbId,
    pub entrance_id: DbId,
    pub triggered_by: DbId,
    pub title: String,
    pub message: String,
    pub severity: String,
    pub is_resolved: bool,
    pub resolved_at: Option<Timestamp>,
    pub is_read: bool,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Alert listing row: the alert plus its entrance.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub alert: Alert,
    pub entrance: Option<Json<EntranceSummary>>,
}

/// Fields pushed to realtime subscribers when an alert is registered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    pub id: DbId,
    pub title: String,
    pub message: String,
    pub severity: String,
    pub created_at: Timestamp,
    pub entrance_id: DbId,
}

impl From<&Alert> for AlertSummary {
    fn from(alert: &Alert) -> Self {
        Self {
            id: alert.id,
            title: alert.title.clone(),
            message: alert.message.clone(),
            severity: alert.severity.clone(),
            created_at: alert.created_at,
            entrance_id: alert.entrance_id,
        }
    }
}

/// Full field set for registering an alert or replacing one wholesale.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AlertInput {
    pub entrance_id: DbId,
    pub triggered_by: DbId,
    #[validate(length(min = 1, max = 100, message = "Title must be 1 to 100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 500, message = "Message must be 1 to 500 characters"))]
    pub message: String,
    pub severity: Severity,
    #[serde(default)]
    pub is_resolved: bool,
    pub resolved_at: Option<Timestamp>,
}

/// Filters accepted by the alert listing.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub entrance_id: Option<DbId>,
    pub is_resolved: Option<bool>,
    pub is_read: Option<bool>,
    pub deleted: DeletedFilter,
}

/// Outcome of a bulk flag update.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BulkUpdateResult {
    pub matched: u64,
    pub modified: u64,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    fn alert() -> Alert {
        let now = Utc::now();
        Alert {
            id: 11,
            entrance_id: 4,
            triggered_by: 9,
            title: "Crowding".into(),
            message: "Gate A is over the high threshold".into(),
            severity: "high".into(),
            is_resolved: false,
            resolved_at: None,
            is_read: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn summary_carries_broadcast_fields() {
        let a = alert();
        let value = serde_json::to_value(AlertSummary::from(&a)).unwrap();
        assert_eq!(value["id"], 11);
        assert_eq!(value["entranceId"], 4);
        assert_eq!(value["severity"], "high");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("triggeredBy").is_none());
    }

    #[test]
    fn input_rejects_unknown_severity() {
        let result = serde_json::from_value::<AlertInput>(json!({
            "entranceId": 1,
            "triggeredBy": 2,
            "title": "t",
            "message": "m",
            "severity": "urgent"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn input_defaults_unresolved() {
        let input: AlertInput = serde_json::from_value(json!({
            "entranceId": 1,
            "triggeredBy": 2,
            "title": "t",
            "message": "m",
            "severity": "low"
        }))
        .unwrap();
        assert!(!input.is_resolved);
        assert_eq!(input.severity, Severity::Low);
    }

    #[test]
    fn bulk_result_shape() {
        let value = serde_json::to_value(BulkUpdateResult { matched: 3, modified: 3 }).unwrap();
        assert_eq!(value, json!({"matched": 3, "modified": 3}));
    }
}
