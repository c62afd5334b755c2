use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use storegate_core::StoreError;

pub const PRODUCT_NOT_FOUND: &str = "Produto não encontrado";
pub const USER_NOT_FOUND: &str = "Usuário não encontrado";
pub const BUCKET_OR_OBJECT_NOT_FOUND: &str = "Bucket ou objeto não encontrado";
pub const INTERNAL_ERROR: &str = "Erro interno do servidor";
pub const INVALID_REQUEST: &str = "Requisição inválida";

/// Map a store failure to a response with a fixed public message.
///
/// Store detail (driver or encoder text) is logged here and never sent to
/// clients.
pub fn store_error_to_response(
    err: StoreError,
    not_found_message: &'static str,
) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", not_found_message),
        StoreError::InvalidInput(detail) => {
            tracing::warn!(detail = %detail, "store rejected the request payload");
            json_error(StatusCode::BAD_REQUEST, "invalid_request", INVALID_REQUEST)
        }
        StoreError::Backend { operation, detail } => {
            tracing::error!(operation, detail = %detail, "store operation failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", INTERNAL_ERROR)
        }
    }
}

/// Turn a JSON extractor rejection into the common error body, keeping
/// axum's status (400 syntax, 415 content type, 422 shape).
pub fn json_rejection(rejection: JsonRejection) -> axum::response::Response {
    json_error(rejection.status(), "invalid_request", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
