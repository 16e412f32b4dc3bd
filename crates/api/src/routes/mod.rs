pub mod health;
pub mod movies;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movies                       public listing (?search=&page=)
/// /movies/{id}                  movie detail
///
/// /admin/movies                 admin listing (?page=), create (multipart POST)
/// /admin/movies/new             create form data
/// /admin/movies/{id}            update (multipart PUT), delete
/// /admin/movies/{id}/edit       edit form data
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/movies", movies::public_router())
        .nest("/admin/movies", movies::admin_router())
}
