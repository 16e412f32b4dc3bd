//! The movie service: one method per catalog use case.
//!
//! Every write validates first and touches nothing on failure. Cover files
//! are written before the row that references them and removed again if
//! that row cannot be written. A cover that a successful update or delete
//! leaves behind is removed afterwards on a best-effort basis: failures are
//! logged, never returned, because the database already reflects the change.

use std::sync::Arc;

use crate::error::CoreError;
use crate::movie::{Category, EditForm, Movie, MovieChanges, MovieForm, NewMovie, UploadedFile};
use crate::naming::cover_file_name;
use crate::pagination::{clamp_page, page_offset, Page, ADMIN_PAGE_SIZE, PUBLIC_PAGE_SIZE};
use crate::search::normalize_term;
use crate::store::{FileStore, MovieStore};
use crate::types::DbId;
use crate::validation::{
    parse_integer, validate_movie_form, FieldErrors, FormMode, MovieFields, MSG_CATEGORY_INVALID,
    MSG_ID_TAKEN,
};

/// Orchestrates validation, cover file placement and persistence.
#[derive(Clone)]
pub struct MovieService {
    store: Arc<dyn MovieStore>,
    files: Arc<dyn FileStore>,
}

impl MovieService {
    pub fn new(store: Arc<dyn MovieStore>, files: Arc<dyn FileStore>) -> Self {
        Self { store, files }
    }

    /// Whether the movie store is reachable.
    pub async fn health_check(&self) -> Result<(), CoreError> {
        self.store.health_check().await
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Public listing: newest first, 6 per page, optionally filtered by a
    /// substring of the title or synopsis.
    pub async fn list(
        &self,
        search: Option<&str>,
        page: Option<i64>,
    ) -> Result<Page<Movie>, CoreError> {
        self.paginate(normalize_term(search), page, PUBLIC_PAGE_SIZE)
            .await
    }

    /// Admin listing: newest first, 10 per page, no filter.
    pub async fn list_for_admin(&self, page: Option<i64>) -> Result<Page<Movie>, CoreError> {
        self.paginate(None, page, ADMIN_PAGE_SIZE).await
    }

    pub async fn detail(&self, id: &str) -> Result<Movie, CoreError> {
        self.store
            .find_movie(id)
            .await?
            .ok_or_else(|| CoreError::movie_not_found(id))
    }

    /// Categories for the create form's selection control.
    pub async fn prepare_create_form(&self) -> Result<Vec<Category>, CoreError> {
        self.store.list_categories().await
    }

    pub async fn prepare_edit_form(&self, id: &str) -> Result<EditForm, CoreError> {
        let movie = self.detail(id).await?;
        let categories = self.store.list_categories().await?;
        Ok(EditForm { movie, categories })
    }

    async fn paginate(
        &self,
        search: Option<&str>,
        page: Option<i64>,
        per_page: i64,
    ) -> Result<Page<Movie>, CoreError> {
        let page = clamp_page(page);
        let total = self.store.count_movies(search).await?;
        let offset = page_offset(page, per_page);

        let items = if offset >= total {
            Vec::new()
        } else {
            self.store.list_movies(search, per_page, offset).await?
        };
        Ok(Page::new(items, page, per_page, total))
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Validate and insert a new movie with its cover image.
    pub async fn create(
        &self,
        form: MovieForm,
        cover: Option<UploadedFile>,
    ) -> Result<Movie, CoreError> {
        let form = form.normalized();
        let cover = cover.filter(|f| !f.is_empty());
        let fields = self
            .validate(&form, FormMode::Create, cover.as_ref())
            .await?;

        let (Some(id), Some(cover)) = (fields.id, cover) else {
            return Err(CoreError::Internal(
                "validated create form is missing its id or cover image".into(),
            ));
        };

        let cover_image = self.store_cover(&cover).await?;
        let input = NewMovie {
            id,
            title: fields.title,
            category_id: fields.category_id,
            synopsis: fields.synopsis,
            year: fields.year,
            cast: fields.cast,
            cover_image,
        };

        let movie = match self.store.create_movie(&input).await {
            Ok(movie) => movie,
            Err(e) => {
                self.remove_cover(&input.cover_image).await;
                return Err(e);
            }
        };

        tracing::info!(
            movie_id = %movie.id,
            cover_image = %movie.cover_image,
            "Movie created",
        );
        Ok(movie)
    }

    /// Validate and apply changes to an existing movie.
    ///
    /// Without a new cover the stored cover is kept as is.
    pub async fn update(
        &self,
        id: &str,
        form: MovieForm,
        cover: Option<UploadedFile>,
    ) -> Result<Movie, CoreError> {
        let form = form.normalized();
        let cover = cover.filter(|f| !f.is_empty());
        let fields = self
            .validate(&form, FormMode::Update, cover.as_ref())
            .await?;

        let existing = self.detail(id).await?;

        let new_cover = match &cover {
            Some(file) => Some(self.store_cover(file).await?),
            None => None,
        };
        let changes = MovieChanges {
            title: fields.title,
            category_id: fields.category_id,
            synopsis: fields.synopsis,
            year: fields.year,
            cast: fields.cast,
            cover_image: new_cover.clone(),
        };

        let result = self.store.update_movie(id, &changes).await;
        let updated = match result {
            Ok(Some(movie)) => movie,
            other => {
                if let Some(name) = &new_cover {
                    self.remove_cover(name).await;
                }
                return match other {
                    Err(e) => Err(e),
                    _ => Err(CoreError::movie_not_found(id)),
                };
            }
        };

        if new_cover.is_some() {
            self.remove_cover(&existing.cover_image).await;
        }

        tracing::info!(
            movie_id = %updated.id,
            cover_replaced = new_cover.is_some(),
            "Movie updated",
        );
        Ok(updated)
    }

    /// Delete a movie and then its cover image. Returns the deleted row.
    pub async fn delete(&self, id: &str) -> Result<Movie, CoreError> {
        let movie = self.detail(id).await?;

        if !self.store.delete_movie(id).await? {
            return Err(CoreError::movie_not_found(id));
        }
        self.remove_cover(&movie.cover_image).await;

        tracing::info!(movie_id = %movie.id, "Movie deleted");
        Ok(movie)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Static rules plus the rules that consult the store. All failures are
    /// collected before anything is written.
    async fn validate(
        &self,
        form: &MovieForm,
        mode: FormMode,
        cover: Option<&UploadedFile>,
    ) -> Result<MovieFields, CoreError> {
        let checked = validate_movie_form(form, mode, cover);
        let mut errors = match &checked {
            Ok(_) => FieldErrors::new(),
            Err(e) => e.clone(),
        };

        if mode == FormMode::Create {
            if let Some(id) = form.id.as_deref() {
                if !errors.contains("id") && self.store.movie_exists(id).await? {
                    errors.add("id", MSG_ID_TAKEN);
                }
            }
        }

        if let Some(category_id) = parse_integer::<DbId>(form.category_id.as_deref()) {
            if !self.store.category_exists(category_id).await? {
                errors.add("category_id", MSG_CATEGORY_INVALID);
            }
        }

        match checked {
            Ok(fields) if errors.is_empty() => Ok(fields),
            _ => Err(CoreError::Validation(errors)),
        }
    }

    /// Move an upload into the file store under a fresh name.
    async fn store_cover(&self, file: &UploadedFile) -> Result<String, CoreError> {
        let name = cover_file_name(file.extension());
        self.files.move_into(&name, &file.bytes).await?;
        tracing::debug!(
            cover_image = %name,
            original_name = %file.file_name,
            content_type = file.content_type.as_deref().unwrap_or("unknown"),
            bytes = file.bytes.len(),
            "Cover image stored",
        );
        Ok(name)
    }

    /// Best-effort removal of a cover file that is no longer referenced.
    async fn remove_cover(&self, name: &str) {
        match self.files.exists(name).await {
            Ok(false) => {}
            Ok(true) => {
                if let Err(e) = self.files.delete(name).await {
                    tracing::warn!(cover_image = %name, error = %e, "Failed to remove cover image");
                }
            }
            Err(e) => {
                tracing::warn!(cover_image = %name, error = %e, "Failed to check cover image");
            }
        }
    }
}
