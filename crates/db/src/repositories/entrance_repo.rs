//! Repository for the `entrances` table.

use crowdwatch_core::pagination::{Page, PageRequest};
use crowdwatch_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, FilterBuilder, ListQuery};
use crate::models::entrance::{Entrance, EntranceFilter, EntranceInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, threshold_medium, threshold_high, is_active, \
                       COALESCE(is_deleted, false) AS is_deleted, created_at, updated_at";

/// Provides CRUD operations for entrances.
pub struct EntranceRepo;

impl EntranceRepo {
    /// Insert a new entrance, returning the created row.
    pub async fn create(pool: &PgPool, input: &EntranceInput) -> Result<Entrance, sqlx::Error> {
        let query = format!(
            "INSERT INTO entrances (name, description, threshold_medium, threshold_high, is_active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entrance>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.threshold_medium)
            .bind(input.threshold_high)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find an entrance by ID, deleted or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Entrance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entrances WHERE id = $1");
        sqlx::query_as::<_, Entrance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every mutable field. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &EntranceInput,
    ) -> Result<Option<Entrance>, sqlx::Error> {
        let query = format!(
            "UPDATE entrances SET
                name = $2,
                description = $3,
                threshold_medium = $4,
                threshold_high = $5,
                is_active = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entrance>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.threshold_medium)
            .bind(input.threshold_high)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the soft-delete flag. Returns `None` if the row does not exist.
    pub async fn set_deleted(
        pool: &PgPool,
        id: DbId,
        deleted: bool,
    ) -> Result<Option<Entrance>, sqlx::Error> {
        let query = format!(
            "UPDATE entrances SET is_deleted = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entrance>(&query)
            .bind(id)
            .bind(deleted)
            .fetch_optional(pool)
            .await
    }

    /// Paginated listing, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &EntranceFilter,
        page: PageRequest,
    ) -> Result<Page<Entrance>, sqlx::Error> {
        let query = ListQuery {
            columns: COLUMNS,
            from: "entrances",
            count_from: "entrances",
            order_by: "created_at DESC",
        };
        let where_ = FilterBuilder::new().deleted("is_deleted", filter.deleted);
        fetch_page(pool, &query, &where_, page).await
    }
}
