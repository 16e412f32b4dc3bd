//! Collaborator traits the movie service depends on.
//!
//! [`MovieStore`] is the relational side (movies and read-only categories),
//! [`FileStore`] the flat directory of cover images. Implementations must
//! be `Send + Sync`; the service shares them behind `Arc<dyn ...>`.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::movie::{Category, Movie, MovieChanges, NewMovie};
use crate::types::DbId;

/// Persistence for movie and category records.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Cheap round trip proving the backend is reachable.
    async fn health_check(&self) -> Result<(), CoreError>;

    /// Movies newest first, optionally filtered to those whose title or
    /// synopsis contains `search`.
    async fn list_movies(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movie>, CoreError>;

    /// Number of movies [`MovieStore::list_movies`] would page over.
    async fn count_movies(&self, search: Option<&str>) -> Result<i64, CoreError>;

    async fn find_movie(&self, id: &str) -> Result<Option<Movie>, CoreError>;

    async fn movie_exists(&self, id: &str) -> Result<bool, CoreError>;

    async fn create_movie(&self, input: &NewMovie) -> Result<Movie, CoreError>;

    /// Returns `None` when no movie has that id.
    async fn update_movie(
        &self,
        id: &str,
        changes: &MovieChanges,
    ) -> Result<Option<Movie>, CoreError>;

    /// Returns `true` if a row was deleted.
    async fn delete_movie(&self, id: &str) -> Result<bool, CoreError>;

    /// All categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, CoreError>;

    async fn category_exists(&self, id: DbId) -> Result<bool, CoreError>;
}

/// Flat blob store for cover images, addressed by file name.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn exists(&self, name: &str) -> Result<bool, CoreError>;

    /// Remove `name`. Removing a missing file is not an error.
    async fn delete(&self, name: &str) -> Result<(), CoreError>;

    /// Place `contents` under `name`, replacing any existing file.
    async fn move_into(&self, name: &str, contents: &[u8]) -> Result<(), CoreError>;
}
