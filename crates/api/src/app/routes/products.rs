use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use storegate_core::ProductId;
use storegate_products::ProductInput;

use crate::app::errors::{self, PRODUCT_NOT_FOUND};
use crate::app::schemas::{CreatedIdSchema, ErrorSchema, MessageSchema, ProductInputSchema, ProductSchema};
use crate::app::services::AppServices;
use crate::app::dto;

pub const PRODUCT_UPDATED: &str = "Produto atualizado com sucesso";
pub const PRODUCT_DELETED: &str = "Produto deletado com sucesso";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// A non-numeric id cannot match any row.
fn parse_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse::<ProductId>()
        .map_err(|_| errors::json_error(StatusCode::NOT_FOUND, "not_found", PRODUCT_NOT_FOUND))
}

#[utoipa::path(
    get,
    path = "/produtos",
    responses(
        (status = 200, description = "All products", body = [ProductSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Produtos"]
)]
pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.products.list().await {
        Ok(products) => Json(products).into_response(),
        Err(e) => errors::store_error_to_response(e, PRODUCT_NOT_FOUND),
    }
}

#[utoipa::path(
    get,
    path = "/produtos/{id}",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ProductSchema),
        (status = 404, description = "Produto não encontrado", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Produtos"]
)]
pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.products.get(id).await {
        Ok(Some(product)) => Json(product).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", PRODUCT_NOT_FOUND),
        Err(e) => errors::store_error_to_response(e, PRODUCT_NOT_FOUND),
    }
}

#[utoipa::path(
    post,
    path = "/produtos",
    request_body = ProductInputSchema,
    responses(
        (status = 201, description = "Product created", body = CreatedIdSchema),
        (status = 422, description = "Missing or mistyped field", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Produtos"]
)]
pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> axum::response::Response {
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection(rejection),
    };

    match services.products.create(input).await {
        Ok(id) => {
            tracing::info!(id = %id, "product created");
            (StatusCode::CREATED, Json(dto::CreatedId { id })).into_response()
        }
        Err(e) => errors::store_error_to_response(e, PRODUCT_NOT_FOUND),
    }
}

#[utoipa::path(
    put,
    path = "/produtos/{id}",
    params(("id" = u64, Path, description = "Product id")),
    request_body = ProductInputSchema,
    responses(
        (status = 200, description = "Produto atualizado com sucesso", body = MessageSchema),
        (status = 404, description = "Produto não encontrado", body = ErrorSchema),
        (status = 422, description = "Missing or mistyped field", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Produtos"]
)]
pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection(rejection),
    };

    match services.products.update(id, input).await {
        Ok(()) => {
            tracing::info!(id = %id, "product updated");
            Json(dto::Message::new(PRODUCT_UPDATED)).into_response()
        }
        Err(e) => errors::store_error_to_response(e, PRODUCT_NOT_FOUND),
    }
}

#[utoipa::path(
    delete,
    path = "/produtos/{id}",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Produto deletado com sucesso", body = MessageSchema),
        (status = 404, description = "Produto não encontrado", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Produtos"]
)]
pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.products.delete(id).await {
        Ok(()) => {
            tracing::info!(id = %id, "product deleted");
            Json(dto::Message::new(PRODUCT_DELETED)).into_response()
        }
        Err(e) => errors::store_error_to_response(e, PRODUCT_NOT_FOUND),
    }
}
