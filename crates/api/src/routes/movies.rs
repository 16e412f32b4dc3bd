//! Route definitions for the movie catalog.
//!
//! Two routers are provided:
//! - `public_router()` for the visitor-facing pages mounted at `/movies`
//! - `admin_router()` for catalog management mounted at `/admin/movies`

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Public movie routes mounted at `/movies`.
///
/// ```text
/// GET /        -> list_movies
/// GET /{id}    -> get_movie
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list_movies))
        .route("/{id}", get(movies::get_movie))
}

/// Admin movie routes mounted at `/admin/movies`.
///
/// ```text
/// GET    /            -> list_admin_movies
/// POST   /            -> create_movie
/// GET    /new         -> create_form
/// PUT    /{id}        -> update_movie
/// DELETE /{id}        -> delete_movie
/// GET    /{id}/edit   -> edit_form
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(movies::list_admin_movies).post(movies::create_movie),
        )
        .route("/new", get(movies::create_form))
        .route(
            "/{id}",
            put(movies::update_movie).delete(movies::delete_movie),
        )
        .route("/{id}/edit", get(movies::edit_form))
}
