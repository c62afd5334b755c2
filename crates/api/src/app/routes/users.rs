use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use storegate_core::UserId;
use storegate_users::UserFields;

use crate::app::dto;
use crate::app::errors::{self, USER_NOT_FOUND};
use crate::app::schemas::{ErrorSchema, MessageSchema, UserFieldsSchema, UserSchema};
use crate::app::services::AppServices;

pub const USER_DELETED: &str = "Usuário deletado com sucesso";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Users accept any JSON object; everything else is a 400.
fn user_fields(
    body: Result<Json<UserFields>, JsonRejection>,
) -> Result<UserFields, axum::response::Response> {
    match body {
        Ok(Json(fields)) => Ok(fields),
        Err(rejection) => Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            rejection.body_text(),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/usuarios",
    responses(
        (status = 200, description = "All users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Usuarios"]
)]
pub async fn list_users(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.users.list().await {
        Ok(users) => Json(users).into_response(),
        Err(e) => errors::store_error_to_response(e, USER_NOT_FOUND),
    }
}

#[utoipa::path(
    get,
    path = "/usuarios/{id}",
    params(("id" = String, Path, description = "24-character hex ObjectId")),
    responses(
        (status = 200, description = "The user", body = UserSchema),
        (status = 404, description = "Usuário não encontrado", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Usuarios"]
)]
pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.users.get(&UserId::new(id)).await {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", USER_NOT_FOUND),
        Err(e) => errors::store_error_to_response(e, USER_NOT_FOUND),
    }
}

#[utoipa::path(
    post,
    path = "/usuarios",
    request_body = UserFieldsSchema,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Usuarios"]
)]
pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<UserFields>, JsonRejection>,
) -> axum::response::Response {
    let fields = match user_fields(body) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };

    match services.users.create(fields).await {
        Ok(user) => {
            tracing::info!(id = %user.id, "user created");
            (StatusCode::CREATED, Json(user)).into_response()
        }
        Err(e) => errors::store_error_to_response(e, USER_NOT_FOUND),
    }
}

#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    params(("id" = String, Path, description = "24-character hex ObjectId")),
    request_body = UserFieldsSchema,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 404, description = "Usuário não encontrado", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Usuarios"]
)]
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<UserFields>, JsonRejection>,
) -> axum::response::Response {
    let fields = match user_fields(body) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };

    match services.users.update(&UserId::new(id), fields).await {
        Ok(user) => {
            tracing::info!(id = %user.id, "user updated");
            Json(user).into_response()
        }
        Err(e) => errors::store_error_to_response(e, USER_NOT_FOUND),
    }
}

#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    params(("id" = String, Path, description = "24-character hex ObjectId")),
    responses(
        (status = 200, description = "Usuário deletado com sucesso", body = MessageSchema),
        (status = 404, description = "Usuário não encontrado", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Usuarios"]
)]
pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = UserId::new(id);
    match services.users.delete(&id).await {
        Ok(()) => {
            tracing::info!(id = %id, "user deleted");
            Json(dto::Message::new(USER_DELETED)).into_response()
        }
        Err(e) => errors::store_error_to_response(e, USER_NOT_FOUND),
    }
}
