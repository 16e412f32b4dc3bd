//! In-memory collaborators for development and tests.
//!
//! Behave like the PostgreSQL store and the local file store, including
//! newest-first ordering and case-insensitive search, but keep everything
//! in process memory behind a `tokio::sync::RwLock`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::movie::{Category, Movie, MovieChanges, NewMovie};
use crate::naming::check_flat_file_name;
use crate::search::{matches_term, normalize_term};
use crate::store::{FileStore, MovieStore};
use crate::types::DbId;
use crate::validation::{FieldErrors, MSG_ID_TAKEN};

// ---------------------------------------------------------------------------
// Movie store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Tables {
    /// Movie id -> (insertion sequence, row). Newest first means highest sequence.
    movies: HashMap<String, (u64, Movie)>,
    categories: Vec<Category>,
    next_seq: u64,
}

/// In-memory [`MovieStore`].
#[derive(Debug, Default)]
pub struct MemoryMovieStore {
    tables: RwLock<Tables>,
}

impl MemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with categories named `names`, with ids from 1.
    pub fn with_categories(names: &[&str]) -> Self {
        let now = Utc::now();
        let categories = names
            .iter()
            .zip(1..)
            .map(|(name, id)| Category {
                id,
                name: (*name).to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect();
        Self {
            tables: RwLock::new(Tables {
                categories,
                ..Tables::default()
            }),
        }
    }

    /// Number of stored movies.
    pub async fn movie_count(&self) -> usize {
        self.tables.read().await.movies.len()
    }

    async fn filtered(&self, search: Option<&str>) -> Vec<Movie> {
        let tables = self.tables.read().await;
        let term = normalize_term(search);
        let mut rows: Vec<&(u64, Movie)> = tables
            .movies
            .values()
            .filter(|(_, m)| term.map_or(true, |t| matches_term(&m.title, &m.synopsis, t)))
            .collect();
        rows.sort_by(|(seq_a, _), (seq_b, _)| seq_b.cmp(seq_a));
        rows.into_iter().map(|(_, m)| m.clone()).collect()
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }

    async fn list_movies(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movie>, CoreError> {
        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(self
            .filtered(search)
            .await
            .into_iter()
            .skip(skip)
            .take(take)
            .collect())
    }

    async fn count_movies(&self, search: Option<&str>) -> Result<i64, CoreError> {
        Ok(self.filtered(search).await.len() as i64)
    }

    async fn find_movie(&self, id: &str) -> Result<Option<Movie>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.movies.get(id).map(|(_, m)| m.clone()))
    }

    async fn movie_exists(&self, id: &str) -> Result<bool, CoreError> {
        Ok(self.tables.read().await.movies.contains_key(id))
    }

    async fn create_movie(&self, input: &NewMovie) -> Result<Movie, CoreError> {
        let mut tables = self.tables.write().await;
        if tables.movies.contains_key(&input.id) {
            let mut errors = FieldErrors::new();
            errors.add("id", MSG_ID_TAKEN);
            return Err(CoreError::Validation(errors));
        }
        if !tables.categories.iter().any(|c| c.id == input.category_id) {
            return Err(CoreError::Storage(format!(
                "category {} does not exist",
                input.category_id
            )));
        }

        let now = Utc::now();
        let movie = Movie {
            id: input.id.clone(),
            title: input.title.clone(),
            category_id: input.category_id,
            synopsis: input.synopsis.clone(),
            year: input.year,
            cast: input.cast.clone(),
            cover_image: input.cover_image.clone(),
            created_at: now,
            updated_at: now,
        };
        let seq = tables.next_seq;
        tables.next_seq += 1;
        tables.movies.insert(movie.id.clone(), (seq, movie.clone()));
        Ok(movie)
    }

    async fn update_movie(
        &self,
        id: &str,
        changes: &MovieChanges,
    ) -> Result<Option<Movie>, CoreError> {
        let mut tables = self.tables.write().await;
        if !tables.categories.iter().any(|c| c.id == changes.category_id) {
            return Err(CoreError::Storage(format!(
                "category {} does not exist",
                changes.category_id
            )));
        }
        let Some((_, movie)) = tables.movies.get_mut(id) else {
            return Ok(None);
        };

        movie.title = changes.title.clone();
        movie.category_id = changes.category_id;
        movie.synopsis = changes.synopsis.clone();
        movie.year = changes.year;
        movie.cast = changes.cast.clone();
        if let Some(cover) = &changes.cover_image {
            movie.cover_image = cover.clone();
        }
        movie.updated_at = Utc::now();
        Ok(Some(movie.clone()))
    }

    async fn delete_movie(&self, id: &str) -> Result<bool, CoreError> {
        Ok(self.tables.write().await.movies.remove(id).is_some())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        let mut categories = self.tables.read().await.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn category_exists(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .iter()
            .any(|c| c.id == id))
    }
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

/// In-memory [`FileStore`].
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents stored under `name`, if any.
    pub async fn contents(&self, name: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(name).cloned()
    }

    /// Stored file names, sorted.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn exists(&self, name: &str) -> Result<bool, CoreError> {
        check_flat_file_name(name)?;
        Ok(self.files.read().await.contains_key(name))
    }

    async fn delete(&self, name: &str) -> Result<(), CoreError> {
        check_flat_file_name(name)?;
        self.files.write().await.remove(name);
        Ok(())
    }

    async fn move_into(&self, name: &str, contents: &[u8]) -> Result<(), CoreError> {
        check_flat_file_name(name)?;
        self.files
            .write()
            .await
            .insert(name.to_string(), contents.to_vec());
        Ok(())
    }
}
