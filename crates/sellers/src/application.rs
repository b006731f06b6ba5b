//! Seller application state machine.
//!
//! States, as stored on the identity:
//!
//! ```text
//! NoApplication ──apply──▶ Pending ──review(approve)──▶ Approved
//!       ▲                     │
//!       │                     └────review(reject)─────▶ Rejected
//!       └──────────────apply (re-application)───────────────┘
//! ```
//!
//! Rejection wipes the qualification profile and reverts the role to buyer,
//! so a rejected identity behaves exactly like one that never applied; the
//! stored `ApplicationState::Rejected` tag is what keeps the two cases
//! distinguishable for admin listings.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vendora_auth::{AccessError, ApplicationState, Identity, Role, SellerProfile, policy};

// ─────────────────────────────────────────────────────────────────────────────
// Inputs
// ─────────────────────────────────────────────────────────────────────────────

/// Data submitted with a seller application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerApplication {
    pub store_name: String,
    pub bio: String,
    pub address: String,
    pub tax_id: Option<String>,
    pub terms_accepted: bool,
}

impl SellerApplication {
    fn validate(&self) -> Result<(), ApplicationError> {
        let store_name = self.store_name.trim();
        if store_name.chars().count() < 2 || store_name.chars().count() > 255 {
            return Err(ApplicationError::Validation(
                "store name must be between 2 and 255 characters".into(),
            ));
        }

        let bio = self.bio.trim();
        if bio.chars().count() < 10 || bio.chars().count() > 1024 {
            return Err(ApplicationError::Validation(
                "bio must be between 10 and 1024 characters".into(),
            ));
        }

        let address = self.address.trim();
        if address.chars().count() < 5 || address.chars().count() > 500 {
            return Err(ApplicationError::Validation(
                "address must be between 5 and 500 characters".into(),
            ));
        }

        if let Some(tax_id) = &self.tax_id {
            if tax_id.chars().count() > 50 {
                return Err(ApplicationError::Validation(
                    "tax id must be at most 50 characters".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Outcome requested by an admin reviewing an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl FromStr for ReviewDecision {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ReviewDecision::Approved),
            "rejected" => Ok(ReviewDecision::Rejected),
            other => Err(ApplicationError::InvalidDecision(other.to_string())),
        }
    }
}

/// User-visible application status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(ApplicationError::Validation(format!(
                "unknown application status: {other}"
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("you are already registered as a seller")]
    AlreadySeller,

    #[error("your seller application has already been approved")]
    AlreadyApproved,

    #[error("you already have a pending seller application")]
    DuplicateApplication,

    #[error("you must accept the terms and conditions to apply as a seller")]
    TermsNotAccepted,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("seller not found")]
    TargetNotFound,

    #[error("user is not a seller applicant")]
    TargetNotApplicant,

    #[error("invalid decision '{0}': must be 'approved' or 'rejected'")]
    InvalidDecision(String),

    #[error("no seller application found")]
    NoApplicationFound,

    #[error(transparent)]
    Access(#[from] AccessError),
}

// ─────────────────────────────────────────────────────────────────────────────
// Transitions
// ─────────────────────────────────────────────────────────────────────────────

/// Apply to become a seller.
///
/// Preconditions are checked in order before any field is touched; on success
/// the identity becomes a pending (unapproved) seller.
pub fn apply(
    identity: &mut Identity,
    application: SellerApplication,
    now: DateTime<Utc>,
) -> Result<(), ApplicationError> {
    if identity.role == Role::Seller {
        return Err(ApplicationError::AlreadySeller);
    }
    if identity.is_seller_approved() {
        return Err(ApplicationError::AlreadyApproved);
    }
    if identity.seller.is_some() {
        return Err(ApplicationError::DuplicateApplication);
    }
    if !application.terms_accepted {
        return Err(ApplicationError::TermsNotAccepted);
    }
    application.validate()?;

    identity.role = Role::Seller;
    identity.seller = Some(SellerProfile {
        store_name: application.store_name.trim().to_string(),
        bio: application.bio.trim().to_string(),
        address: application.address.trim().to_string(),
        tax_id: application.tax_id,
        verified: false,
    });
    identity.application = ApplicationState::Pending;
    identity.touch(now);

    Ok(())
}

/// Review a seller application (admin only).
///
/// Approval marks the seller approved and verified. Rejection wipes the
/// qualification profile and reverts the role to buyer; the stored state
/// keeps the `Rejected` tag.
pub fn review(
    admin: &Identity,
    target: &mut Identity,
    decision: ReviewDecision,
    now: DateTime<Utc>,
) -> Result<(), ApplicationError> {
    policy::require_admin(admin)?;

    if target.role != Role::Seller {
        return Err(ApplicationError::TargetNotApplicant);
    }

    match decision {
        ReviewDecision::Approved => {
            target.application = ApplicationState::Approved;
            if let Some(profile) = target.seller.as_mut() {
                profile.verified = true;
            }
        }
        ReviewDecision::Rejected => {
            target.seller = None;
            target.application = ApplicationState::Rejected;
            target.role = Role::Buyer;
        }
    }
    target.touch(now);

    Ok(())
}

/// Project the user-visible application status for an identity.
///
/// The projection rule mirrors the stored shape: approved wins, a missing
/// profile means rejected, anything else is pending. Identities that are not
/// sellers have no application to report on.
pub fn status_of(identity: &Identity) -> Result<ApplicationStatus, ApplicationError> {
    if identity.role != Role::Seller {
        return Err(ApplicationError::NoApplicationFound);
    }

    if identity.is_seller_approved() {
        Ok(ApplicationStatus::Approved)
    } else if identity.seller.is_none() {
        Ok(ApplicationStatus::Rejected)
    } else {
        Ok(ApplicationStatus::Pending)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
