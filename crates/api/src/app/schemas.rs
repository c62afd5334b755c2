//! OpenAPI schema definitions for the JSON bodies.
//!
//! Domain crates stay free of utoipa; these wrappers mirror their wire
//! shape and exist only for documentation.

use utoipa::ToSchema;

/// A product row (`produto` table).
#[derive(ToSchema)]
#[schema(as = Product)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ProductSchema {
    #[schema(rename = "Id", example = 1)]
    id: u64,
    #[schema(rename = "Nome", example = "Caneta")]
    name: String,
    #[schema(rename = "Descricao", example = "Azul")]
    description: String,
    /// Rounded to two decimal places by the store.
    #[schema(rename = "Preco", example = 2.5)]
    price: f64,
}

/// Body of `POST /produtos` and `PUT /produtos/{id}`; every field is required.
#[derive(ToSchema)]
#[schema(as = ProductInput)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ProductInputSchema {
    #[schema(rename = "Nome", example = "Caneta")]
    name: String,
    #[schema(rename = "Descricao", example = "Azul")]
    description: String,
    #[schema(rename = "Preco", example = 2.5)]
    price: f64,
}

/// A user document. Any additional fields supplied on create are stored
/// and returned as-is.
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    #[schema(rename = "_id", example = "65f1a2b3c4d5e6f708091a2b")]
    id: String,
    #[schema(example = "Ana")]
    name: Option<String>,
    #[schema(example = "ana@example.com")]
    email: Option<String>,
}

/// Any JSON object. An `_id` key is ignored.
#[derive(ToSchema)]
#[schema(as = UserFields)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserFieldsSchema {
    #[schema(example = "Ana")]
    name: Option<String>,
    #[schema(example = "ana@example.com")]
    email: Option<String>,
}

#[derive(ToSchema)]
#[schema(as = BucketSummary)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct BucketSchema {
    #[schema(example = "fotos")]
    name: String,
    #[schema(value_type = Option<String>, format = DateTime)]
    created_at: Option<String>,
}

#[derive(ToSchema)]
#[schema(as = ObjectSummary)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ObjectSchema {
    #[schema(example = "relatorio.pdf")]
    key: String,
    /// Size in bytes.
    size: u64,
    #[schema(value_type = Option<String>, format = DateTime)]
    last_modified: Option<String>,
    etag: Option<String>,
}

#[derive(ToSchema)]
#[schema(as = StoredObject)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct StoredObjectSchema {
    bucket: String,
    key: String,
    size: u64,
}

/// `multipart/form-data` body of the upload endpoint.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UploadForm {
    /// The file; its file name becomes the object key.
    #[schema(value_type = String, format = Binary)]
    file: String,
}

/// Error body shared by every endpoint.
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// One of `not_found`, `invalid_request`, `internal_error`.
    #[schema(example = "not_found")]
    error: String,
    #[schema(example = "Produto não encontrado")]
    message: String,
}

#[derive(ToSchema)]
#[schema(as = Message)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct MessageSchema {
    #[schema(example = "Produto deletado com sucesso")]
    message: String,
}

#[derive(ToSchema)]
#[schema(as = CreatedId)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CreatedIdSchema {
    #[schema(example = 1)]
    id: u64,
}
