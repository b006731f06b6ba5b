use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use vendora_auth::Identity;
use vendora_core::{DomainError, UserId};

use crate::store::IdentityStore;

/// Registration and lookup of identities.
pub struct IdentityDirectory {
    identities: Arc<dyn IdentityStore>,
}

impl IdentityDirectory {
    pub fn new(identities: Arc<dyn IdentityStore>) -> Self {
        Self { identities }
    }

    /// Register a new buyer identity.
    pub fn register(
        &self,
        email: impl Into<String>,
        username: Option<String>,
    ) -> Result<Identity, DomainError> {
        let identity = Identity::register(email, username, Utc::now())?;
        if self.identities.find_by_email(&identity.email).is_some() {
            return Err(DomainError::conflict("email already registered"));
        }
        self.identities.upsert(identity.clone());
        info!(user_id = %identity.id, "identity registered");
        Ok(identity)
    }

    /// Resolve an acting identity. Soft-deleted identities do not resolve.
    pub fn resolve(&self, id: UserId) -> Option<Identity> {
        self.identities.get(id).filter(|i| !i.is_deleted())
    }
}
