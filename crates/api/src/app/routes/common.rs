use axum::Extension;
use axum::response::Response;

use vendora_auth::Identity;

use crate::app::errors;
use crate::context::CurrentUser;

/// Turn the optional auth context into an identity or a 401.
pub fn require_user(user: Option<Extension<CurrentUser>>) -> Result<Identity, Response> {
    match user {
        Some(Extension(CurrentUser(identity))) => Ok(identity),
        None => Err(errors::unauthenticated()),
    }
}
