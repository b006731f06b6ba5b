use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use vendora_auth::policy;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/apply", post(apply))
        .route("/application-status", get(application_status))
        .route("/profile", get(profile))
}

/// Apply to become a seller.
pub async fn apply(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<dto::SellerApplicationRequest>,
) -> axum::response::Response {
    let actor = match common::require_user(user) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match services.sellers.apply(&actor, body.into_application()) {
        Ok(identity) => Json(dto::SellerApplicationResponse::from_identity(
            &identity, "pending",
        ))
        .into_response(),
        Err(error) => errors::application_error_response(error),
    }
}

/// Current application status for the acting identity.
pub async fn application_status(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
) -> axum::response::Response {
    let actor = match common::require_user(user) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match services.sellers.status_of(&actor) {
        Ok(status) => Json(dto::SellerApplicationResponse::from_identity(
            &actor,
            status.as_str(),
        ))
        .into_response(),
        Err(error) => errors::application_error_response(error),
    }
}

/// Seller profile (approved sellers only).
pub async fn profile(user: Option<Extension<CurrentUser>>) -> axum::response::Response {
    let actor = match common::require_user(user) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    if let Err(error) = policy::require_approved_seller(&actor) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", error.to_string());
    }

    Json(dto::SellerProfileResponse::from_identity(&actor)).into_response()
}
