//! Identity record: the single stored shape for buyers, sellers and admins.
//!
//! # Invariants
//! - `application == Approved` implies `role == Seller`.
//! - An identity whose role is not `Seller` carries no seller profile.
//! - Identities are never hard-deleted; `deleted_at` is a soft-delete marker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::{DomainError, UserId};

use crate::Role;

/// Seller qualification bundle, present once an identity has applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerProfile {
    pub store_name: String,
    pub bio: String,
    pub address: String,
    pub tax_id: Option<String>,
    /// Identity verified by an admin (set on approval).
    pub verified: bool,
}

/// Stored seller-application state.
///
/// This is a tagged state rather than a nullability pattern: `Rejected` is
/// distinguishable from `NoApplication` even though both leave the identity
/// as a plain buyer with no profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationState {
    #[default]
    NoApplication,
    Pending,
    Approved,
    Rejected,
}

/// Aggregate seller statistics, maintained by the services that change them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SellerStats {
    /// Total revenue, in the store currency.
    pub total_sales: f64,
    /// Number of non-archived products.
    pub total_products: u32,
    /// Average rating across the seller's products.
    pub seller_rating: f64,
}

/// A user identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub username: Option<String>,
    pub role: Role,
    pub seller: Option<SellerProfile>,
    pub application: ApplicationState,
    pub stats: SellerStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// Register a new identity. Everyone starts as a buyer.
    pub fn register(
        email: impl Into<String>,
        username: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let email = email.into();
        if email.trim().is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        Ok(Self {
            id: UserId::new(),
            email: email.trim().to_lowercase(),
            username: username.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()),
            role: Role::Buyer,
            seller: None,
            application: ApplicationState::NoApplication,
            stats: SellerStats::default(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    pub fn is_seller_approved(&self) -> bool {
        self.application == ApplicationState::Approved
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Public display name: store name, falling back to username, then email.
    pub fn display_name(&self) -> &str {
        if let Some(profile) = &self.seller {
            if !profile.store_name.is_empty() {
                return &profile.store_name;
            }
        }
        match &self.username {
            Some(username) => username,
            None => &self.email,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
