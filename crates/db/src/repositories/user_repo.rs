//! Repository for the `users` table.

use crowdwatch_core::pagination::{Page, PageRequest};
use crowdwatch_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, FilterBuilder, ListQuery};
use crate::models::user::{CreateUser, UpdateUser, User, UserFilter, UserResponse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone_no, password_hash, role, \
                       COALESCE(is_deleted, false) AS is_deleted, created_at, updated_at";

/// Columns safe to return from listings (no password hash).
const PUBLIC_COLUMNS: &str = "id, name, email, phone_no, role, \
                              COALESCE(is_deleted, false) AS is_deleted, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, phone_no, password_hash, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_no)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID, deleted or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive), deleted or not.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Whether any user other than `exclude` already holds this email or phone.
    ///
    /// Soft-deleted users count: their contact details stay reserved.
    pub async fn contact_taken(
        pool: &PgPool,
        email: Option<&str>,
        phone_no: Option<&str>,
        exclude: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM users
                WHERE (email = $1 OR phone_no = $2)
                  AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(email)
        .bind(phone_no)
        .bind(exclude)
        .fetch_one(pool)
        .await
    }

    /// Patch a user. Only `Some` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone_no = COALESCE($4, phone_no),
                password_hash = COALESCE($5, password_hash)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_no)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the soft-delete flag. Returns `None` if the row does not exist.
    pub async fn set_deleted(
        pool: &PgPool,
        id: DbId,
        deleted: bool,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET is_deleted = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(deleted)
            .fetch_optional(pool)
            .await
    }

    /// Paginated listing, newest first, with partial-match contact filters.
    pub async fn list(
        pool: &PgPool,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<UserResponse>, sqlx::Error> {
        let query = ListQuery {
            columns: PUBLIC_COLUMNS,
            from: "users",
            count_from: "users",
            order_by: "created_at DESC",
        };
        let where_ = FilterBuilder::new()
            .ilike("name", filter.name.as_deref())
            .ilike("email", filter.email.as_deref())
            .ilike("phone_no", filter.phone_no.as_deref())
            .deleted("is_deleted", filter.deleted);
        fetch_page(pool, &query, &where_, page).await
    }
}
