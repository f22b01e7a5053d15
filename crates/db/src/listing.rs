//! Filtered, paginated listing queries.
//!
//! A listing is described by a [`ListQuery`] (projection, joins, ordering)
//! and a [`FilterBuilder`] (the `WHERE` clause and its bind values).
//! [`fetch_page`] runs a count and a windowed data query over the same
//! predicate and assembles a [`Page`].

use crowdwatch_core::listing::DeletedFilter;
use crowdwatch_core::pagination::{Page, PageRequest};
use crowdwatch_core::types::DbId;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{FromRow, PgPool, Postgres};

// ---------------------------------------------------------------------------
// Filter builder
// ---------------------------------------------------------------------------

/// A typed value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    BigInt(i64),
    Bool(bool),
    Text(String),
}

/// Accumulates `WHERE` conditions with `$n` placeholders numbered in order.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    conditions: Vec<String>,
    binds: Vec<BindValue>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, condition: impl FnOnce(usize) -> String, value: BindValue) -> Self {
        let idx = self.binds.len() + 1;
        self.conditions.push(condition(idx));
        self.binds.push(value);
        self
    }

    /// `column = $n` when `value` is present.
    pub fn eq_id(self, column: &str, value: Option<DbId>) -> Self {
        match value {
            Some(v) => self.push(|i| format!("{column} = ${i}"), BindValue::BigInt(v)),
            None => self,
        }
    }

    /// `column = $n` when `value` is present.
    pub fn eq_bool(self, column: &str, value: Option<bool>) -> Self {
        match value {
            Some(v) => self.push(|i| format!("{column} = ${i}"), BindValue::Bool(v)),
            None => self,
        }
    }

    /// Case-insensitive partial match. Wildcards in `value` match literally.
    pub fn ilike(self, column: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.push(
                |i| format!("{column} ILIKE ${i} ESCAPE '\\'"),
                BindValue::Text(format!("%{}%", escape_like(v))),
            ),
            None => self,
        }
    }

    /// Soft-delete predicate over `column`. Every listing goes through here.
    pub fn deleted(mut self, column: &str, filter: DeletedFilter) -> Self {
        self.conditions.push(filter.predicate(column));
        self
    }

    /// The assembled `WHERE ...` clause, or an empty string.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Number of placeholders consumed so far.
    pub fn bind_count(&self) -> usize {
        self.binds.len()
    }

    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }

    fn bind_as<'q, O>(
        &'q self,
        mut q: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for val in &self.binds {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Bool(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }
        q
    }

    fn bind_scalar<'q, O>(
        &'q self,
        mut q: QueryScalar<'q, Postgres, O, PgArguments>,
    ) -> QueryScalar<'q, Postgres, O, PgArguments> {
        for val in &self.binds {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Bool(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }
        q
    }
}

/// Escape `%`, `_` and `\` so user text is matched literally by `ILIKE`.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Listing query
// ---------------------------------------------------------------------------

/// Shape of a listing: what to select, from where, and in which order.
///
/// `count_from` names the base table with the same alias used by the filter
/// conditions; joins only enrich rows and never change the count.
#[derive(Debug, Clone, Copy)]
pub struct ListQuery<'a> {
    pub columns: &'a str,
    pub from: &'a str,
    pub count_from: &'a str,
    pub order_by: &'a str,
}

impl ListQuery<'_> {
    pub fn count_sql(&self, filter: &FilterBuilder) -> String {
        format!(
            "SELECT COUNT(*)::BIGINT FROM {} {}",
            self.count_from,
            filter.where_clause()
        )
    }

    pub fn data_sql(&self, filter: &FilterBuilder) -> String {
        let n = filter.bind_count();
        format!(
            "SELECT {} FROM {} {} ORDER BY {} LIMIT ${} OFFSET ${}",
            self.columns,
            self.from,
            filter.where_clause(),
            self.order_by,
            n + 1,
            n + 2
        )
    }
}

/// Run a listing and return one page of rows plus metadata.
///
/// Read-only: two `SELECT`s sharing the same predicate.
pub async fn fetch_page<T>(
    pool: &PgPool,
    query: &ListQuery<'_>,
    filter: &FilterBuilder,
    page: PageRequest,
) -> Result<Page<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let count_sql = query.count_sql(filter);
    let total = filter
        .bind_scalar(sqlx::query_scalar::<_, i64>(&count_sql))
        .fetch_one(pool)
        .await?;

    if total == 0 {
        return Ok(Page::new(0, page, Vec::new()));
    }

    let data_sql = query.data_sql(filter);
    let rows = filter
        .bind_as(sqlx::query_as::<_, T>(&data_sql))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok(Page::new(total, page, rows))
}

// ---------------------------------------------------------------------------
// Shared join projections
// ---------------------------------------------------------------------------

/// JSON object for an entrance joined under `alias`, or `NULL` when the
/// reference does not resolve.
pub fn entrance_summary_json(alias: &str) -> String {
    format!(
        "CASE WHEN {alias}.id IS NULL THEN NULL ELSE json_build_object(\
            'id', {alias}.id, \
            'name', {alias}.name, \
            'description', {alias}.description, \
            'thresholdMedium', {alias}.threshold_medium, \
            'thresholdHigh', {alias}.threshold_high, \
            'isActive', {alias}.is_active) END"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_has_no_where_clause() {
        let f = FilterBuilder::new();
        assert_eq!(f.where_clause(), "");
        assert_eq!(f.bind_count(), 0);
    }

    #[test]
    fn placeholders_are_numbered_in_order() {
        let f = FilterBuilder::new()
            .eq_id("a.entrance_id", Some(7))
            .eq_bool("a.is_resolved", None)
            .eq_bool("a.is_read", Some(false))
            .deleted("a.is_deleted", DeletedFilter::Active);

        assert_eq!(
            f.where_clause(),
            "WHERE a.entrance_id = $1 AND a.is_read = $2 \
             AND (a.is_deleted = false OR a.is_deleted IS NULL)"
        );
        assert_eq!(f.binds(), &[BindValue::BigInt(7), BindValue::Bool(false)]);
    }

    #[test]
    fn only_deleted_predicate() {
        let f = FilterBuilder::new().deleted("is_deleted", DeletedFilter::OnlyDeleted);
        assert_eq!(f.where_clause(), "WHERE is_deleted = true");
        assert_eq!(f.bind_count(), 0);
    }

    #[test]
    fn ilike_wraps_and_escapes() {
        let f = FilterBuilder::new().ilike("u.name", Some("50%_off"));
        assert_eq!(f.where_clause(), "WHERE u.name ILIKE $1 ESCAPE '\\'");
        assert_eq!(f.binds(), &[BindValue::Text("%50\\%\\_off%".to_string())]);
    }

    #[test]
    fn data_sql_appends_limit_and_offset_after_filter_binds() {
        let q = ListQuery {
            columns: "e.id",
            from: "entrances e",
            count_from: "entrances e",
            order_by: "e.created_at DESC",
        };
        let f = FilterBuilder::new()
            .eq_bool("e.is_active", Some(true))
            .deleted("e.is_deleted", DeletedFilter::Active);

        assert_eq!(
            q.data_sql(&f),
            "SELECT e.id FROM entrances e WHERE e.is_active = $1 \
             AND (e.is_deleted = false OR e.is_deleted IS NULL) \
             ORDER BY e.created_at DESC LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            q.count_sql(&f),
            "SELECT COUNT(*)::BIGINT FROM entrances e WHERE e.is_active = $1 \
             AND (e.is_deleted = false OR e.is_deleted IS NULL)"
        );
    }

    #[test]
    fn entrance_summary_is_null_safe() {
        let sql = entrance_summary_json("e");
        assert!(sql.starts_with("CASE WHEN e.id IS NULL THEN NULL"));
        assert!(sql.contains("'thresholdMedium', e.threshold_medium"));
    }
}
