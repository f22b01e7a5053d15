//! Repository for the `detections` table.

use crowdwatch_core::pagination::{Page, PageRequest};
use crowdwatch_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{entrance_summary_json, fetch_page, FilterBuilder, ListQuery};
use crate::models::detection::{Detection, DetectionFilter, DetectionInput, DetectionListItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, camera_id, entrance_id, count, timestamp, image_snapshot, density, \
                       COALESCE(is_deleted, false) AS is_deleted, created_at, updated_at";

const LIST_COLUMNS: &str = "d.id, d.camera_id, d.entrance_id, d.count, d.timestamp, \
                            d.image_snapshot, d.density, \
                            COALESCE(d.is_deleted, false) AS is_deleted, \
                            d.created_at, d.updated_at";

const CAMERA_SUMMARY_JSON: &str = "CASE WHEN c.id IS NULL THEN NULL ELSE json_build_object(\
        'id', c.id, \
        'deviceId', c.device_id, \
        'name', c.name, \
        'streamUrl', c.stream_url, \
        'roi', c.roi, \
        'isActive', c.is_active, \
        'ipAddress', c.ip_address, \
        'location', c.location) END";

/// Provides CRUD operations for detections.
pub struct DetectionRepo;

impl DetectionRepo {
    /// Insert a new detection. A missing timestamp defaults to now.
    pub async fn create(pool: &PgPool, input: &DetectionInput) -> Result<Detection, sqlx::Error> {
        let query = format!(
            "INSERT INTO detections
                (camera_id, entrance_id, count, timestamp, image_snapshot, density)
             VALUES ($1, $2, $3, COALESCE($4, NOW()), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Detection>(&query)
            .bind(input.camera_id)
            .bind(input.entrance_id)
            .bind(input.count)
            .bind(input.timestamp)
            .bind(&input.image_snapshot)
            .bind(input.density)
            .fetch_one(pool)
            .await
    }

    /// Find a detection by ID, deleted or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Detection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM detections WHERE id = $1");
        sqlx::query_as::<_, Detection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every mutable field. Returns `None` if the row does not exist.
    ///
    /// An omitted timestamp keeps the stored event time.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &DetectionInput,
    ) -> Result<Option<Detection>, sqlx::Error> {
        let query = format!(
            "UPDATE detections SET
                camera_id = $2,
                entrance_id = $3,
                count = $4,
                timestamp = COALESCE($5, timestamp),
                image_snapshot = $6,
                density = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Detection>(&query)
            .bind(id)
            .bind(input.camera_id)
            .bind(input.entrance_id)
            .bind(input.count)
            .bind(input.timestamp)
            .bind(&input.image_snapshot)
            .bind(input.density)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the soft-delete flag. Returns `None` if the row does not exist.
    pub async fn set_deleted(
        pool: &PgPool,
        id: DbId,
        deleted: bool,
    ) -> Result<Option<Detection>, sqlx::Error> {
        let query =
            format!("UPDATE detections SET is_deleted = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Detection>(&query)
            .bind(id)
            .bind(deleted)
            .fetch_optional(pool)
            .await
    }

    /// Paginated listing ordered by event time, with camera and entrance.
    pub async fn list(
        pool: &PgPool,
        filter: &DetectionFilter,
        page: PageRequest,
    ) -> Result<Page<DetectionListItem>, sqlx::Error> {
        let columns = format!(
            "{LIST_COLUMNS}, {CAMERA_SUMMARY_JSON} AS camera, {} AS entrance",
            entrance_summary_json("e")
        );
        let query = ListQuery {
            columns: &columns,
            from: "detections d
                   LEFT JOIN cameras c ON c.id = d.camera_id
                   LEFT JOIN entrances e ON e.id = d.entrance_id",
            count_from: "detections d",
            order_by: "d.timestamp DESC",
        };
        let where_ = FilterBuilder::new()
            .eq_id("d.camera_id", filter.camera_id)
            .eq_id("d.entrance_id", filter.entrance_id)
            .deleted("d.is_deleted", filter.deleted);
        fetch_page(pool, &query, &where_, page).await
    }
}
