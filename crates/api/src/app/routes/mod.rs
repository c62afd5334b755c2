use axum::{
    routing::{get, post},
    Router,
};

pub mod buckets;
pub mod products;
pub mod system;
pub mod users;

/// Router for every resource endpoint (health and docs are added by
/// `build_app`).
pub fn router() -> Router {
    Router::new()
        .route("/init-db", post(system::init_db))
        .route("/mongodb/testar-conexao", get(system::test_mongo_connection))
        .nest("/buckets", buckets::router())
        .nest("/produtos", products::router())
        .nest("/usuarios", users::router())
}
