use axum::Router;

pub mod admin;
pub mod auth;
pub mod common;
pub mod products;
pub mod sellers;
pub mod system;

/// Router for all `/api/v1` endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/sellers", sellers::router())
        .nest("/admin", admin::router())
        .nest("/products", products::router())
}
