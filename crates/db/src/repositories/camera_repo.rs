//! Repository for the `cameras` table.

use crowdwatch_core::pagination::{Page, PageRequest};
use crowdwatch_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::listing::{entrance_summary_json, fetch_page, FilterBuilder, ListQuery};
use crate::models::camera::{Camera, CameraFilter, CameraInput, CameraListItem, CameraLocation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, entrance_id, device_id, name, stream_url, roi, is_active, ip_address, \
                       location, COALESCE(is_deleted, false) AS is_deleted, created_at, updated_at";

/// Camera columns qualified with the `c` alias used by listing joins.
const LIST_COLUMNS: &str = "c.id, c.entrance_id, c.device_id, c.name, c.stream_url, c.roi, \
                            c.is_active, c.ip_address, c.location, \
                            COALESCE(c.is_deleted, false) AS is_deleted, \
                            c.created_at, c.updated_at";

/// Joins the parent entrance and the single newest detection per camera.
const LIST_FROM: &str = "cameras c
     LEFT JOIN entrances e ON e.id = c.entrance_id
     LEFT JOIN LATERAL (
         SELECT id, count, density, image_snapshot, timestamp, entrance_id
         FROM detections
         WHERE camera_id = c.id
         ORDER BY timestamp DESC
         LIMIT 1
     ) d ON true";

const LATEST_DETECTION_JSON: &str = "CASE WHEN d.id IS NULL THEN NULL ELSE json_build_object(\
        'id', d.id, \
        'count', d.count, \
        'density', d.density, \
        'imageSnapshot', d.image_snapshot, \
        'timestamp', d.timestamp, \
        'entranceId', d.entrance_id) END";

/// Provides CRUD operations for cameras.
pub struct CameraRepo;

impl CameraRepo {
    /// Insert a new camera, returning the created row.
    ///
    /// A duplicate `device_id` fails with the `uq_cameras_device_id` violation.
    pub async fn create(pool: &PgPool, input: &CameraInput) -> Result<Camera, sqlx::Error> {
        let query = format!(
            "INSERT INTO cameras
                (entrance_id, device_id, name, stream_url, roi, is_active, ip_address, location)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Camera>(&query)
            .bind(input.entrance_id)
            .bind(&input.device_id)
            .bind(&input.name)
            .bind(&input.stream_url)
            .bind(input.roi.as_ref().map(Json))
            .bind(input.is_active)
            .bind(&input.ip_address)
            .bind(input.location.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// Find a camera by ID, deleted or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Camera>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cameras WHERE id = $1");
        sqlx::query_as::<_, Camera>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every mutable field. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CameraInput,
    ) -> Result<Option<Camera>, sqlx::Error> {
        let query = format!(
            "UPDATE cameras SET
                entrance_id = $2,
                device_id = $3,
                name = $4,
                stream_url = $5,
                roi = $6,
                is_active = $7,
                ip_address = $8,
                location = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Camera>(&query)
            .bind(id)
            .bind(input.entrance_id)
            .bind(&input.device_id)
            .bind(&input.name)
            .bind(&input.stream_url)
            .bind(input.roi.as_ref().map(Json))
            .bind(input.is_active)
            .bind(&input.ip_address)
            .bind(input.location.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the soft-delete flag. Returns `None` if the row does not exist.
    pub async fn set_deleted(
        pool: &PgPool,
        id: DbId,
        deleted: bool,
    ) -> Result<Option<Camera>, sqlx::Error> {
        let query = format!("UPDATE cameras SET is_deleted = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Camera>(&query)
            .bind(id)
            .bind(deleted)
            .fetch_optional(pool)
            .await
    }

    /// Paginated listing, newest first, with entrance and latest detection.
    pub async fn list(
        pool: &PgPool,
        filter: &CameraFilter,
        page: PageRequest,
    ) -> Result<Page<CameraListItem>, sqlx::Error> {
        let columns = format!(
            "{LIST_COLUMNS}, {} AS entrance, {LATEST_DETECTION_JSON} AS latest_detection",
            entrance_summary_json("e")
        );
        let query = ListQuery {
            columns: &columns,
            from: LIST_FROM,
            count_from: "cameras c",
            order_by: "c.created_at DESC",
        };
        let where_ = FilterBuilder::new()
            .eq_id("c.entrance_id", filter.entrance_id)
            .eq_bool("c.is_active", filter.is_active)
            .deleted("c.is_deleted", filter.deleted);
        fetch_page(pool, &query, &where_, page).await
    }

    /// Active, non-deleted cameras with their location and entrance name.
    pub async fn list_locations(pool: &PgPool) -> Result<Vec<CameraLocation>, sqlx::Error> {
        sqlx::query_as::<_, CameraLocation>(
            "SELECT c.id, c.name, c.location,
                    CASE WHEN e.id IS NULL THEN NULL
                         ELSE json_build_object('id', e.id, 'name', e.name) END AS entrance
             FROM cameras c
             LEFT JOIN entrances e ON e.id = c.entrance_id
             WHERE c.is_active = true AND (c.is_deleted = false OR c.is_deleted IS NULL)
             ORDER BY c.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }
}
