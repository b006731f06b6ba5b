//! Consistent JSON error responses and the domain-error → status mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use vendora_core::DomainError;
use vendora_products::ProductError;
use vendora_sellers::ApplicationError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn unauthenticated() -> axum::response::Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "unauthenticated",
        "authentication required",
    )
}

pub fn application_error_response(err: ApplicationError) -> axum::response::Response {
    use ApplicationError::*;
    match &err {
        TargetNotFound | NoApplicationFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        Access(_) => json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string()),
        AlreadySeller | AlreadyApproved | DuplicateApplication | TermsNotAccepted
        | TargetNotApplicant | InvalidDecision(_) | Validation(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
    }
}

pub fn product_error_response(err: ProductError) -> axum::response::Response {
    use ProductError::*;
    match &err {
        NotFound => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        SellerNotApproved | AdminRequired | NotOwner => {
            json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
        }
        AssetTooLarge { .. } | AssetTypeNotAllowed(_) | ThumbnailTypeNotAllowed(_)
        | Validation(_) | InvalidTransition(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
    }
}

pub fn domain_error_response(err: DomainError) -> axum::response::Response {
    match &err {
        DomainError::Validation(_) | DomainError::InvalidId(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", err.to_string()),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        DomainError::Unauthorized => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", err.to_string())
        }
        DomainError::InvariantViolation(_) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invariant_violation",
            err.to_string(),
        ),
    }
}
