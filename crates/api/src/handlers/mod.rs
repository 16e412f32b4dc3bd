//! Request handlers for the movie catalog.
//!
//! Handlers decode the request, delegate to [`MovieService`] and map errors
//! via [`AppError`].
//!
//! [`MovieService`]: filmdex_core::service::MovieService
//! [`AppError`]: crate::error::AppError

pub mod movies;
