use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Multipart, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use vendora_catalog::{ProductFilters, SortDirection, SortKey};
use vendora_core::{Page, ProductId};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/me", get(my_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Create a listing (multipart: scalar fields + `file` + optional
/// `thumbnail`).
pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
    multipart: Multipart,
) -> axum::response::Response {
    let actor = match common::require_user(user) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    let form = match dto::ProductForm::read(multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };
    let input = match form.new_product() {
        Ok(input) => input,
        Err(response) => return response,
    };
    let Some(file) = form.file else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "missing required field 'file'",
        );
    };

    match services.products.create(&actor, input, file, form.thumbnail) {
        Ok(product) => (
            StatusCode::CREATED,
            Json(dto::ProductResponse::owner_view(&product, &[])),
        )
            .into_response(),
        Err(error) => errors::product_error_response(error),
    }
}

/// Public catalog listing.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::CatalogQuery>,
) -> axum::response::Response {
    let sort_by = match query.sort_by.as_deref() {
        None => SortKey::default(),
        Some(raw) => match raw.parse::<SortKey>() {
            Ok(key) => key,
            Err(error) => return errors::domain_error_response(error),
        },
    };
    let sort_order = match query.sort_order.as_deref() {
        None => SortDirection::default(),
        Some(raw) => match raw.parse::<SortDirection>() {
            Ok(direction) => direction,
            Err(error) => return errors::domain_error_response(error),
        },
    };

    let filters = ProductFilters {
        category: query.category,
        search: query.search,
    };
    let cards = services.catalog.list_public(
        &filters,
        sort_by,
        sort_order,
        Page::new(query.skip, query.limit),
    );

    Json(cards).into_response()
}

/// Public detail view. Hidden and missing products both 404.
pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id: ProductId = match id.parse() {
        Ok(product_id) => product_id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    match services.products.get_public(product_id) {
        Ok((product, reviews)) => {
            Json(dto::ProductResponse::public_view(&product, &reviews)).into_response()
        }
        Err(error) => errors::product_error_response(error),
    }
}

/// The acting seller's own products, every status included.
pub async fn my_products(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
) -> axum::response::Response {
    let actor = match common::require_user(user) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match services.products.list_mine(&actor) {
        Ok(products) => {
            let body: Vec<_> = products
                .iter()
                .map(|product| {
                    let reviews = services.products.reviews_for(product.id);
                    dto::ProductResponse::owner_view(product, &reviews)
                })
                .collect();
            Json(body).into_response()
        }
        Err(error) => errors::product_error_response(error),
    }
}

/// Owner update (multipart; every field optional, `file`/`thumbnail` replace
/// the stored blobs).
pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<String>,
    multipart: Multipart,
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
    let form = match dto::ProductForm::read(multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };
    let patch = match form.patch() {
        Ok(patch) => patch,
        Err(response) => return response,
    };

    match services
        .products
        .update(&actor, product_id, patch, form.file, form.thumbnail)
    {
        Ok(product) => {
            let reviews = services.products.reviews_for(product.id);
            Json(dto::ProductResponse::owner_view(&product, &reviews)).into_response()
        }
        Err(error) => errors::product_error_response(error),
    }
}

/// Owner soft delete: archive and hide.
pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<String>,
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

    match services.products.delete(&actor, product_id) {
        Ok(()) => Json(json!({ "message": "product archived" })).into_response(),
        Err(error) => errors::product_error_response(error),
    }
}
