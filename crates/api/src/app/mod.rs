//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store clients shared by every handler
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: small response bodies
//! - `errors.rs`: consistent error responses
//! - `schemas.rs`/`doc.rs`: OpenAPI document served under `/api-docs`

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod doc;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod schemas;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(services: AppServices, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", doc::ApiDoc::openapi()))
        .layer(Extension(Arc::new(services)))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
