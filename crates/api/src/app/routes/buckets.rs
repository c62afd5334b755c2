use std::sync::Arc;

use axum::{
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

use crate::app::errors::{self, BUCKET_OR_OBJECT_NOT_FOUND};
use crate::app::schemas::{BucketSchema, ErrorSchema, ObjectSchema, StoredObjectSchema, UploadForm};
use crate::app::services::AppServices;

/// Multipart field that carries the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_buckets))
        .route("/:name", get(list_objects))
        .route("/:name/upload", post(upload_file))
        .route("/:name/file/:file", delete(delete_file))
}

#[utoipa::path(
    get,
    path = "/buckets",
    responses(
        (status = 200, description = "Buckets visible to the configured credentials", body = [BucketSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Buckets"]
)]
pub async fn list_buckets(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.objects.list_buckets().await {
        Ok(buckets) => Json(buckets).into_response(),
        Err(e) => errors::store_error_to_response(e, BUCKET_OR_OBJECT_NOT_FOUND),
    }
}

#[utoipa::path(
    get,
    path = "/buckets/{name}",
    params(("name" = String, Path, description = "Bucket name")),
    responses(
        (status = 200, description = "Objects in the bucket", body = [ObjectSchema]),
        (status = 404, description = "Bucket ou objeto não encontrado", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Buckets"]
)]
pub async fn list_objects(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.objects.list_objects(&name).await {
        Ok(objects) => Json(objects).into_response(),
        Err(e) => errors::store_error_to_response(e, BUCKET_OR_OBJECT_NOT_FOUND),
    }
}

/// Store the `file` part under its original file name.
#[utoipa::path(
    post,
    path = "/buckets/{name}/upload",
    params(("name" = String, Path, description = "Bucket name")),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored object", body = StoredObjectSchema),
        (status = 400, description = "No `file` part in the form", body = ErrorSchema),
        (status = 404, description = "Bucket ou objeto não encontrado", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Buckets"]
)]
pub async fn upload_file(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    mut multipart: Multipart,
) -> axum::response::Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return errors::json_error(e.status(), "invalid_request", e.body_text()),
        };
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let Some(key) = field.file_name().filter(|n| !n.is_empty()).map(str::to_string) else {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                "the `file` part has no file name",
            );
        };
        let content_type = field.content_type().map(str::to_string);
        let body = match field.bytes().await {
            Ok(body) => body,
            Err(e) => return errors::json_error(e.status(), "invalid_request", e.body_text()),
        };

        return match services.objects.put_object(&name, &key, body, content_type).await {
            Ok(stored) => {
                tracing::info!(bucket = %stored.bucket, key = %stored.key, size = stored.size, "object uploaded");
                Json(stored).into_response()
            }
            Err(e) => errors::store_error_to_response(e, BUCKET_OR_OBJECT_NOT_FOUND),
        };
    }

    errors::json_error(
        StatusCode::BAD_REQUEST,
        "invalid_request",
        "missing multipart field `file`",
    )
}

#[utoipa::path(
    delete,
    path = "/buckets/{name}/file/{file}",
    params(
        ("name" = String, Path, description = "Bucket name"),
        ("file" = String, Path, description = "Object key")
    ),
    responses(
        (status = 204, description = "Object deleted"),
        (status = 404, description = "Bucket ou objeto não encontrado", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["Buckets"]
)]
pub async fn delete_file(
    Extension(services): Extension<Arc<AppServices>>,
    Path((name, file)): Path<(String, String)>,
) -> axum::response::Response {
    match services.objects.delete_object(&name, &file).await {
        Ok(()) => {
            tracing::info!(bucket = %name, key = %file, "object deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::store_error_to_response(e, BUCKET_OR_OBJECT_NOT_FOUND),
    }
}
