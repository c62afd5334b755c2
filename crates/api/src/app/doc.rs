//! OpenAPI documentation served at `/api-docs` (UI) and
//! `/api-docs/openapi.json` (document).

use utoipa::OpenApi;

use crate::app::schemas::{
    BucketSchema, CreatedIdSchema, ErrorSchema, MessageSchema, ObjectSchema, ProductInputSchema,
    ProductSchema, StoredObjectSchema, UploadForm, UserFieldsSchema, UserSchema,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "storegate",
        description = "HTTP gateway over S3 buckets, a MySQL product table and a MongoDB user collection."
    ),
    paths(
        crate::app::routes::buckets::list_buckets,
        crate::app::routes::buckets::list_objects,
        crate::app::routes::buckets::upload_file,
        crate::app::routes::buckets::delete_file,
        crate::app::routes::system::init_db,
        crate::app::routes::products::list_products,
        crate::app::routes::products::get_product,
        crate::app::routes::products::create_product,
        crate::app::routes::products::update_product,
        crate::app::routes::products::delete_product,
        crate::app::routes::system::test_mongo_connection,
        crate::app::routes::users::list_users,
        crate::app::routes::users::get_user,
        crate::app::routes::users::create_user,
        crate::app::routes::users::update_user,
        crate::app::routes::users::delete_user,
    ),
    components(schemas(
        ProductSchema,
        ProductInputSchema,
        UserSchema,
        UserFieldsSchema,
        BucketSchema,
        ObjectSchema,
        StoredObjectSchema,
        UploadForm,
        ErrorSchema,
        MessageSchema,
        CreatedIdSchema,
    )),
    tags(
        (name = "Buckets", description = "S3 bucket listing, upload and delete"),
        (name = "Produtos", description = "Product CRUD over MySQL"),
        (name = "Usuarios", description = "User CRUD over MongoDB"),
        (name = "MongoDB", description = "Document store connectivity")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/buckets",
            "/buckets/{name}",
            "/buckets/{name}/upload",
            "/buckets/{name}/file/{file}",
            "/init-db",
            "/produtos",
            "/produtos/{id}",
            "/mongodb/testar-conexao",
            "/usuarios",
            "/usuarios/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn product_paths_carry_every_method() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let by_id = &json["paths"]["/produtos/{id}"];
        for method in ["get", "put", "delete"] {
            assert!(by_id.get(method).is_some(), "missing {method}");
        }
        assert!(json["paths"]["/produtos"].get("post").is_some());
    }

    #[test]
    fn product_schema_uses_wire_names() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        let product = &json["components"]["schemas"]["Product"]["properties"];
        for key in ["Id", "Nome", "Descricao", "Preco"] {
            assert!(product.get(key).is_some(), "missing {key}");
        }
        assert!(json["components"]["schemas"]["User"]["properties"].get("_id").is_some());
    }
}
