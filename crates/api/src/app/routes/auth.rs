use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/whoami", get(whoami))
}

/// Register a new buyer identity.
///
/// The returned id doubles as the bearer token for subsequent requests
/// (token issuance is an external concern in this deployment).
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    match services.directory.register(body.email, body.username) {
        Ok(identity) => (
            StatusCode::CREATED,
            Json(dto::IdentityResponse::from_identity(&identity)),
        )
            .into_response(),
        Err(error) => errors::domain_error_response(error),
    }
}

pub async fn whoami(user: Option<Extension<CurrentUser>>) -> axum::response::Response {
    match common::require_user(user) {
        Ok(identity) => Json(dto::IdentityResponse::from_identity(&identity)).into_response(),
        Err(response) => response,
    }
}
