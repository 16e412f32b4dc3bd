//! Handlers for the public movie pages and the admin movie CRUD.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use filmdex_core::movie::Category;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::{parse_page, ListParams, PageParams};
use crate::response::{ActionResponse, DataResponse};
use crate::state::AppState;
use crate::upload::read_movie_form;

/// Where the client lands after creating a movie.
pub const CREATED_REDIRECT: &str = "/movies";
/// Where the client lands after updating or deleting a movie.
pub const ADMIN_REDIRECT: &str = "/admin/movies";

pub const FLASH_SAVED: &str = "Movie saved successfully.";
pub const FLASH_UPDATED: &str = "Movie updated successfully.";
pub const FLASH_DELETED: &str = "Movie deleted successfully.";

/// Payload of the create form endpoint.
#[derive(Debug, Serialize)]
pub struct CreateFormData {
    pub categories: Vec<Category>,
}

// ---------------------------------------------------------------------------
// Public pages
// ---------------------------------------------------------------------------

/// GET /api/v1/movies?search=&page=
///
/// Newest movies first, six per page, optionally filtered by a substring
/// of the title or synopsis.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .service
        .list(params.search.as_deref(), parse_page(params.page.as_deref()))
        .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let movie = state.service.detail(&id).await?;
    Ok(Json(DataResponse { data: movie }))
}

// ---------------------------------------------------------------------------
// Admin pages
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/movies?page=
///
/// Newest movies first, ten per page.
pub async fn list_admin_movies(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .service
        .list_for_admin(parse_page(params.page.as_deref()))
        .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/admin/movies/new
pub async fn create_form(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = state.service.prepare_create_form().await?;
    Ok(Json(DataResponse {
        data: CreateFormData { categories },
    }))
}

/// POST /api/v1/admin/movies
///
/// Accepts a multipart form with the movie's text fields and a required
/// `cover_image` file part. A rejected form comes back as 422 with the
/// field messages and the submitted values.
pub async fn create_movie(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let submission = read_movie_form(multipart).await?;
    let old_input = submission.form.clone();

    let movie = state
        .service
        .create(submission.form, submission.cover)
        .await
        .map_err(|e| AppError::with_old_input(e, old_input))?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse {
            data: movie,
            redirect_to: CREATED_REDIRECT,
            flash: FLASH_SAVED,
        }),
    ))
}

/// GET /api/v1/admin/movies/{id}/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let form = state.service.prepare_edit_form(&id).await?;
    Ok(Json(DataResponse { data: form }))
}

/// PUT /api/v1/admin/movies/{id}
///
/// Same form as create. The cover is optional here and the path id wins
/// over any submitted `id` field.
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let submission = read_movie_form(multipart).await?;
    let old_input = submission.form.clone();

    let movie = state
        .service
        .update(&id, submission.form, submission.cover)
        .await
        .map_err(|e| AppError::with_old_input(e, old_input))?;

    Ok(Json(ActionResponse {
        data: movie,
        redirect_to: ADMIN_REDIRECT,
        flash: FLASH_UPDATED,
    }))
}

/// DELETE /api/v1/admin/movies/{id}
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let movie = state.service.delete(&id).await?;

    Ok(Json(ActionResponse {
        data: movie,
        redirect_to: ADMIN_REDIRECT,
        flash: FLASH_DELETED,
    }))
}
