use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use vendora_core::UserId;
use vendora_infra::IdentityDirectory;

use crate::context::CurrentUser;

#[derive(Clone)]
pub struct AuthState {
    pub directory: Arc<IdentityDirectory>,
}

/// Resolve the acting identity from `Authorization: Bearer <user-id>`.
///
/// Requests without the header pass through anonymously (public routes);
/// a header that is present but does not resolve is rejected outright.
pub async fn auth_context(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(token) = extract_bearer(req.headers()) {
        let user_id: UserId = token.parse().map_err(|_| StatusCode::UNAUTHORIZED)?;
        let identity = state
            .directory
            .resolve(user_id)
            .ok_or(StatusCode::UNAUTHORIZED)?;
        req.extensions_mut().insert(CurrentUser(identity));
    }

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
