use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app::errors;
use crate::app::services::AppServices;

pub const SCHEMA_READY: &str = "Banco de dados e tabela criados com sucesso.";
pub const MONGO_REACHABLE: &str = "Conexão com MongoDB estabelecida com sucesso!";

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Create the product database and table if they do not exist.
#[utoipa::path(
    post,
    path = "/init-db",
    responses(
        (status = 200, description = "Database and table ready", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = crate::app::schemas::ErrorSchema)
    ),
    tags = ["Produtos"]
)]
pub async fn init_db(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.products.init_schema().await {
        Ok(()) => {
            tracing::info!("product schema initialized");
            (StatusCode::OK, SCHEMA_READY).into_response()
        }
        Err(e) => errors::store_error_to_response(e, errors::PRODUCT_NOT_FOUND),
    }
}

/// Probe the document store with a `ping` command.
#[utoipa::path(
    get,
    path = "/mongodb/testar-conexao",
    responses(
        (status = 200, description = "MongoDB reachable", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = crate::app::schemas::ErrorSchema)
    ),
    tags = ["MongoDB"]
)]
pub async fn test_mongo_connection(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.users.ping().await {
        Ok(()) => (StatusCode::OK, MONGO_REACHABLE).into_response(),
        Err(e) => errors::store_error_to_response(e, errors::USER_NOT_FOUND),
    }
}
