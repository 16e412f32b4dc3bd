//! Repository for the `movies` table.

use filmdex_core::movie::{MovieChanges, NewMovie};
use sqlx::PgPool;

use crate::models::movie::MovieRow;

/// Column list for movies queries.
const COLUMNS: &str =
    "id, title, category_id, synopsis, year, cast_members, cover_image, created_at, updated_at";

/// Optional title/synopsis filter. `$1` is a `LIKE` pattern or NULL.
const SEARCH_FILTER: &str =
    "($1::TEXT IS NULL OR title ILIKE $1 ESCAPE '\\' OR synopsis ILIKE $1 ESCAPE '\\')";

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// List movies newest first, optionally filtered by a `LIKE` pattern
    /// (see `filmdex_core::search::like_pattern`).
    pub async fn list(
        pool: &PgPool,
        pattern: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MovieRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE {SEARCH_FILTER}
             ORDER BY created_at DESC, created_seq DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count movies matching the same filter as [`MovieRepo::list`].
    pub async fn count(pool: &PgPool, pattern: Option<&str>) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM movies WHERE {SEARCH_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(pattern)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<MovieRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Insert a new movie, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewMovie) -> Result<MovieRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (id, title, category_id, synopsis, year, cast_members, cover_image)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(&input.id)
            .bind(&input.title)
            .bind(input.category_id)
            .bind(&input.synopsis)
            .bind(input.year)
            .bind(&input.cast)
            .bind(&input.cover_image)
            .fetch_one(pool)
            .await
    }

    /// Update a movie by ID, returning the updated row.
    ///
    /// A `None` cover image keeps the stored value.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        changes: &MovieChanges,
    ) -> Result<Option<MovieRow>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = $2,
                category_id = $3,
                synopsis = $4,
                year = $5,
                cast_members = $6,
                cover_image = COALESCE($7, cover_image),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(changes.category_id)
            .bind(&changes.synopsis)
            .bind(changes.year)
            .bind(&changes.cast)
            .bind(&changes.cover_image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
