//! `MovieStore` backed by PostgreSQL.

use async_trait::async_trait;
use filmdex_core::error::CoreError;
use filmdex_core::movie::{Category, Movie, MovieChanges, NewMovie};
use filmdex_core::search::{like_pattern, normalize_term};
use filmdex_core::store::MovieStore;
use filmdex_core::types::DbId;
use filmdex_core::validation::{FieldErrors, MSG_CATEGORY_INVALID, MSG_ID_TAKEN};

use crate::repositories::{CategoryRepo, MovieRepo};
use crate::DbPool;

/// PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Adapts the movie and category repositories to [`MovieStore`].
#[derive(Debug, Clone)]
pub struct PgMovieStore {
    pool: DbPool,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn search_pattern(search: Option<&str>) -> Option<String> {
    normalize_term(search).map(like_pattern)
}

/// Map a sqlx error onto the core taxonomy.
///
/// Races that slip past validation (a duplicate id inserted concurrently,
/// a category deleted in between) surface as field errors, like the
/// checks they bypassed. Everything else becomes an opaque storage error.
fn map_db_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let field = match (db_err.code().as_deref(), db_err.constraint()) {
            (Some(UNIQUE_VIOLATION), Some("pk_movies")) => Some(("id", MSG_ID_TAKEN)),
            (Some(FOREIGN_KEY_VIOLATION), Some("fk_movies_category_id")) => {
                Some(("category_id", MSG_CATEGORY_INVALID))
            }
            _ => None,
        };
        if let Some((field, message)) = field {
            let mut errors = FieldErrors::new();
            errors.add(field, message);
            return CoreError::Validation(errors);
        }
    }

    tracing::error!(error = %err, "Database error");
    CoreError::Storage(err.to_string())
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(map_db_error)
    }

    async fn list_movies(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movie>, CoreError> {
        let pattern = search_pattern(search);
        let rows = MovieRepo::list(&self.pool, pattern.as_deref(), limit, offset)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn count_movies(&self, search: Option<&str>) -> Result<i64, CoreError> {
        let pattern = search_pattern(search);
        MovieRepo::count(&self.pool, pattern.as_deref())
            .await
            .map_err(map_db_error)
    }

    async fn find_movie(&self, id: &str) -> Result<Option<Movie>, CoreError> {
        let row = MovieRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(Movie::from))
    }

    async fn movie_exists(&self, id: &str) -> Result<bool, CoreError> {
        MovieRepo::exists(&self.pool, id)
            .await
            .map_err(map_db_error)
    }

    async fn create_movie(&self, input: &NewMovie) -> Result<Movie, CoreError> {
        let row = MovieRepo::create(&self.pool, input)
            .await
            .map_err(map_db_error)?;
        Ok(row.into())
    }

    async fn update_movie(
        &self,
        id: &str,
        changes: &MovieChanges,
    ) -> Result<Option<Movie>, CoreError> {
        let row = MovieRepo::update(&self.pool, id, changes)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(Movie::from))
    }

    async fn delete_movie(&self, id: &str) -> Result<bool, CoreError> {
        MovieRepo::delete(&self.pool, id)
            .await
            .map_err(map_db_error)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        let rows = CategoryRepo::list(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn category_exists(&self, id: DbId) -> Result<bool, CoreError> {
        CategoryRepo::exists(&self.pool, id)
            .await
            .map_err(map_db_error)
    }
}
