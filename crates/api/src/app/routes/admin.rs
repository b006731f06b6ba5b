use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use vendora_auth::policy;
use vendora_core::{Page, ProductId, UserId};
use vendora_sellers::{ApplicationStatus, ReviewDecision};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/sellers", get(list_seller_applications))
        .route("/sellers/:id/review", post(review_seller))
        .route("/products/:id/suspend", post(suspend_product))
        .route("/products/:id/reinstate", post(reinstate_product))
}

/// Admin review queue, optionally filtered by application status.
pub async fn list_seller_applications(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
    Query(query): Query<dto::ApplicationListQuery>,
) -> axum::response::Response {
    let actor = match common::require_user(user) {
        Ok(actor) => actor,
        Err(response) => return response,
    };
    if let Err(error) = policy::require_admin(&actor) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", error.to_string());
    }

    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<ApplicationStatus>() {
            Ok(status) => Some(status),
            Err(error) => return errors::application_error_response(error),
        },
    };

    let rows = services
        .sellers
        .list_applications(status, Page::new(query.skip, query.limit));

    let body: Vec<_> = rows
        .iter()
        .map(|identity| {
            let label = dto::application_status_label(identity.application).unwrap_or("pending");
            dto::SellerApplicationResponse::from_identity(identity, label)
        })
        .collect();

    Json(body).into_response()
}

/// Approve or reject a seller application.
pub async fn review_seller(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ReviewRequest>,
) -> axum::response::Response {
    let actor = match common::require_user(user) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    let target: UserId = match id.parse() {
        Ok(target) => target,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
        }
    };
    let decision = match body.decision.parse::<ReviewDecision>() {
        Ok(decision) => decision,
        Err(error) => return errors::application_error_response(error),
    };

    match services.sellers.review(&actor, target, decision) {
        Ok(identity) => {
            let label = match decision {
                ReviewDecision::Approved => "approved",
                ReviewDecision::Rejected => "rejected",
            };
            Json(dto::SellerApplicationResponse::from_identity(&identity, label)).into_response()
        }
        Err(error) => errors::application_error_response(error),
    }
}

/// Moderation: take an active listing down.
pub async fn suspend_product(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    moderate(services, user, &id, Moderation::Suspend).await
}

/// Moderation: put a suspended listing back on sale.
pub async fn reinstate_product(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    moderate(services, user, &id, Moderation::Reinstate).await
}

enum Moderation {
    Suspend,
    Reinstate,
}

async fn moderate(
    services: Arc<AppServices>,
    user: Option<Extension<CurrentUser>>,
    id: &str,
    action: Moderation,
) -> axum::response::Response {
    let actor = match common::require_user(user) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    let product_id: ProductId = match id.parse() {
        Ok(product_id) => product_id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    let result = match action {
        Moderation::Suspend => services.products.suspend(&actor, product_id),
        Moderation::Reinstate => services.products.reinstate(&actor, product_id),
    };

    match result {
        Ok(product) => {
            let reviews = services.products.reviews_for(product.id);
            Json(dto::ProductResponse::owner_view(&product, &reviews)).into_response()
        }
        Err(error) => errors::product_error_response(error),
    }
}
