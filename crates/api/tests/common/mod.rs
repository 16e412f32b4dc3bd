#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use filmdex_api::config::{ServerConfig, DEFAULT_MAX_BODY_BYTES};
use filmdex_api::router::build_app_router;
use filmdex_api::state::AppState;
use filmdex_core::memory::{MemoryFileStore, MemoryMovieStore};
use filmdex_core::service::MovieService;
use filmdex_core::store::MovieStore;

/// Categories every test app starts with, ids 1..=3 in this order.
pub const CATEGORIES: &[&str] = &["Action", "Drama", "Sci-Fi"];

/// Minimal PNG signature plus the start of an IHDR chunk.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

const BOUNDARY: &str = "filmdex-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        image_dir: PathBuf::from("public/images"),
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
    }
}

/// The router plus handles on its in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub movies: Arc<MemoryMovieStore>,
    pub files: Arc<MemoryFileStore>,
}

/// Build the full application router, with all middleware layers, over
/// in-memory stores seeded with [`CATEGORIES`].
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let movies = Arc::new(MemoryMovieStore::with_categories(CATEGORIES));
    let files = Arc::new(MemoryFileStore::new());

    let service = MovieService::new(movies.clone(), files.clone());
    let state = AppState {
        service: Arc::new(service),
    };

    TestApp {
        router: build_app_router(state, &config),
        movies,
        files,
    }
}

/// Build the application router over an arbitrary movie store and an empty
/// in-memory file store.
pub fn build_app_with_store(store: Arc<dyn MovieStore>) -> Router {
    let service = MovieService::new(store, Arc::new(MemoryFileStore::new()));
    let state = AppState {
        service: Arc::new(service),
    };
    build_app_router(state, &test_config())
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, form: &MultipartForm) -> Response<Body> {
    send_multipart(app, Method::POST, uri, form).await
}

pub async fn put_multipart(app: Router, uri: &str, form: &MultipartForm) -> Response<Body> {
    send_multipart(app, Method::PUT, uri, form).await
}

async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    form: &MultipartForm,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(form.to_body()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

/// A `multipart/form-data` body under construction.
#[derive(Debug, Default, Clone)]
pub struct MultipartForm {
    parts: Vec<(String, Option<String>, Vec<u8>)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts
            .push((name.to_string(), None, value.as_bytes().to_vec()));
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.parts
            .push((name.to_string(), Some(file_name.to_string()), bytes.to_vec()));
        self
    }

    fn to_body(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, file_name, bytes) in &self.parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file_name {
                Some(file_name) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                }
                None => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }
}

/// A complete, valid create form for movie `id`.
pub fn movie_form(id: &str, title: &str) -> MultipartForm {
    MultipartForm::new()
        .text("id", id)
        .text("title", title)
        .text("category_id", "3")
        .text("synopsis", &format!("Synopsis of {title}"))
        .text("year", "1999")
        .text("cast", "Keanu Reeves")
        .file("cover_image", "cover.png", PNG_BYTES)
}

/// Create a movie through the API and assert it succeeded.
pub async fn create_movie(app: &TestApp, id: &str, title: &str) -> serde_json::Value {
    let response = post_multipart(
        app.router.clone(),
        "/api/v1/admin/movies",
        &movie_form(id, title),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
