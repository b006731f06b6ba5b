use vendora_auth::Identity;

/// The resolved acting identity for a request.
///
/// Inserted by the auth middleware when a valid bearer token is present;
/// handlers that require authentication turn its absence into a 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);
