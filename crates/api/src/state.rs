use std::sync::Arc;

use filmdex_core::service::MovieService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Movie catalog use cases, wired to the configured stores.
    pub service: Arc<MovieService>,
}
