use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use vendora_auth::{ApplicationState, Identity};
use vendora_core::{Page, UserId};
use vendora_sellers::{ApplicationError, ApplicationStatus, ReviewDecision, SellerApplication};

use crate::store::IdentityStore;

/// Cap on the admin review-queue page size.
const APPLICATION_PAGE_CAP: usize = 100;

/// Orchestrates the seller application workflow against the identity store.
pub struct SellerWorkflow {
    identities: Arc<dyn IdentityStore>,
}

impl SellerWorkflow {
    pub fn new(identities: Arc<dyn IdentityStore>) -> Self {
        Self { identities }
    }

    /// Apply to become a seller.
    ///
    /// The transition runs on the caller's resolved snapshot; concurrent
    /// applications for the same identity are not serialized here and resolve
    /// to last-write-wins at the store.
    pub fn apply(
        &self,
        actor: &Identity,
        application: SellerApplication,
    ) -> Result<Identity, ApplicationError> {
        let mut identity = actor.clone();
        vendora_sellers::apply(&mut identity, application, Utc::now())?;
        self.identities.upsert(identity.clone());
        info!(user_id = %identity.id, "seller application submitted");
        Ok(identity)
    }

    /// Approve or reject a pending application (admin only).
    pub fn review(
        &self,
        admin: &Identity,
        target: UserId,
        decision: ReviewDecision,
    ) -> Result<Identity, ApplicationError> {
        let mut identity = self
            .identities
            .get(target)
            .ok_or(ApplicationError::TargetNotFound)?;
        vendora_sellers::review(admin, &mut identity, decision, Utc::now())?;
        self.identities.upsert(identity.clone());
        info!(user_id = %identity.id, decision = ?decision, "seller application reviewed");
        Ok(identity)
    }

    /// Current application status for the acting identity.
    pub fn status_of(&self, actor: &Identity) -> Result<ApplicationStatus, ApplicationError> {
        vendora_sellers::status_of(actor)
    }

    /// Admin review queue: every identity with an application on record,
    /// optionally narrowed to one state.
    pub fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
        page: Page,
    ) -> Vec<Identity> {
        let rows = self
            .identities
            .applicants()
            .into_iter()
            .filter(|identity| match status {
                None => true,
                Some(ApplicationStatus::Pending) => {
                    identity.application == ApplicationState::Pending
                }
                Some(ApplicationStatus::Approved) => {
                    identity.application == ApplicationState::Approved
                }
                Some(ApplicationStatus::Rejected) => {
                    identity.application == ApplicationState::Rejected
                }
            })
            .collect();
        page.clamped(APPLICATION_PAGE_CAP).slice(rows)
    }
}
