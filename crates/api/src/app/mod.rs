//! HTTP application wiring (axum router + service wiring).
//!
//! Structure:
//! - `services.rs`: infrastructure wiring (stores, blob store, services)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and multipart parsing
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app() -> Router {
    let services = Arc::new(services::build_services());
    let auth_state = middleware::AuthState {
        directory: services.directory.clone(),
    };

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/v1", routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(axum::middleware::from_fn_with_state(
                    auth_state,
                    middleware::auth_context,
                )),
        )
        // Multipart bodies must fit the asset cap plus thumbnail and fields.
        .layer(axum::extract::DefaultBodyLimit::max(110 * 1024 * 1024))
}
