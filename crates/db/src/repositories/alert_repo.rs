//! Repository for the `alerts` table.

use crowdwatch_core::pagination::{Page, PageRequest};
use crowdwatch_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::listing::{entrance_summary_json, fetch_page, FilterBuilder, ListQuery};
use crate::models::alert::{Alert, AlertFilter, AlertInput, AlertListItem, BulkUpdateResult};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, entrance_id, triggered_by, title, message, severity, is_resolved, \
                       resolved_at, is_read, COALESCE(is_deleted, false) AS is_deleted, \
                       created_at, updated_at";

const LIST_COLUMNS: &str = "a.id, a.entrance_id, a.triggered_by, a.title, a.message, \
                            a.severity, a.is_resolved, a.resolved_at, a.is_read, \
                            COALESCE(a.is_deleted, false) AS is_deleted, \
                            a.created_at, a.updated_at";

/// Provides CRUD and bulk read-flag operations for alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert a new alert with an already-resolved `resolved_at`.
    pub async fn create(
        pool: &PgPool,
        input: &AlertInput,
        resolved_at: Option<Timestamp>,
    ) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts
                (entrance_id, triggered_by, title, message, severity, is_resolved, resolved_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(input.entrance_id)
            .bind(input.triggered_by)
            .bind(&input.title)
            .bind(&input.message)
            .bind(input.severity.as_str())
            .bind(input.is_resolved)
            .bind(resolved_at)
            .fetch_one(pool)
            .await
    }

    /// Find an alert by ID, deleted or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every mutable field. `is_read` is left to the read-flag operations.
    ///
    /// `resolved_at` follows the same rule as [`resolved_at_for`], evaluated
    /// against the stored row inside the single UPDATE: a supplied value wins,
    /// the first unresolved-to-resolved transition stamps `NOW()`, and
    /// otherwise the stored value is kept.
    ///
    /// Returns `None` if the row does not exist.
    ///
    /// [`resolved_at_for`]: crowdwatch_core::alert::resolved_at_for
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &AlertInput,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts SET
                entrance_id = $2,
                triggered_by = $3,
                title = $4,
                message = $5,
                severity = $6,
                is_resolved = $7,
                resolved_at = COALESCE(
                    $8,
                    CASE WHEN $7 AND NOT is_resolved AND resolved_at IS NULL
                         THEN NOW()
                         ELSE resolved_at
                    END)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .bind(input.entrance_id)
            .bind(input.triggered_by)
            .bind(&input.title)
            .bind(&input.message)
            .bind(input.severity.as_str())
            .bind(input.is_resolved)
            .bind(input.resolved_at)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the soft-delete flag. Returns `None` if the row does not exist.
    pub async fn set_deleted(
        pool: &PgPool,
        id: DbId,
        deleted: bool,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("UPDATE alerts SET is_deleted = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .bind(deleted)
            .fetch_optional(pool)
            .await
    }

    /// Paginated listing, newest first, with the parent entrance.
    pub async fn list(
        pool: &PgPool,
        filter: &AlertFilter,
        page: PageRequest,
    ) -> Result<Page<AlertListItem>, sqlx::Error> {
        let columns = format!("{LIST_COLUMNS}, {} AS entrance", entrance_summary_json("e"));
        let query = ListQuery {
            columns: &columns,
            from: "alerts a LEFT JOIN entrances e ON e.id = a.entrance_id",
            count_from: "alerts a",
            order_by: "a.created_at DESC",
        };
        let where_ = FilterBuilder::new()
            .eq_id("a.entrance_id", filter.entrance_id)
            .eq_bool("a.is_resolved", filter.is_resolved)
            .eq_bool("a.is_read", filter.is_read)
            .deleted("a.is_deleted", filter.deleted);
        fetch_page(pool, &query, &where_, page).await
    }

    /// Mark every unread, non-deleted alert as read, across all entrances.
    pub async fn mark_all_read(pool: &PgPool) -> Result<BulkUpdateResult, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE alerts SET is_read = true
             WHERE is_read = false AND (is_deleted = false OR is_deleted IS NULL)",
        )
        .execute(pool)
        .await?;
        // Only unread rows match, so every matched row is modified.
        let n = result.rows_affected();
        Ok(BulkUpdateResult {
            matched: n,
            modified: n,
        })
    }

    /// Unread, non-deleted alerts for one entrance, newest first.
    pub async fn list_unread_for_entrance(
        pool: &PgPool,
        entrance_id: DbId,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts
             WHERE entrance_id = $1
               AND is_read = false
               AND (is_deleted = false OR is_deleted IS NULL)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(entrance_id)
            .fetch_all(pool)
            .await
    }
}
