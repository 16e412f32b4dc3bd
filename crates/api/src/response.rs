//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Mutations add the
//! navigation hint a browser client follows afterwards.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: page }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Response to a successful create, update or delete.
///
/// `redirect_to` is the client-side location to navigate to next and
/// `flash` the one-time confirmation message to show there.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T: Serialize> {
    pub data: T,
    pub redirect_to: &'static str,
    pub flash: &'static str,
}
