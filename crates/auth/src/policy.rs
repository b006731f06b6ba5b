//! Access policy layer: pure decision functions.
//!
//! Every authorization decision in the system is built from the three
//! primitives below; there is no role hierarchy.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy checks)

use thiserror::Error;

use vendora_core::UserId;

use crate::{Identity, Role};

/// Denial reason for a policy check.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("admin access required")]
    AdminRequired,

    #[error("seller access required")]
    SellerRequired,

    #[error("seller account not approved")]
    SellerNotApproved,

    #[error("access denied: you can only manage your own products")]
    NotOwner,
}

pub fn is_admin(actor: &Identity) -> bool {
    actor.role == Role::Admin
}

pub fn is_approved_seller(actor: &Identity) -> bool {
    actor.role == Role::Seller && actor.is_seller_approved()
}

pub fn is_owner(actor: &Identity, owner: UserId) -> bool {
    actor.id == owner
}

pub fn require_admin(actor: &Identity) -> Result<(), AccessError> {
    if is_admin(actor) {
        Ok(())
    } else {
        Err(AccessError::AdminRequired)
    }
}

/// An actor may manage products only as an approved seller.
///
/// The denial distinguishes "not a seller at all" from "seller awaiting
/// approval" so callers can surface an accurate message.
pub fn require_approved_seller(actor: &Identity) -> Result<(), AccessError> {
    if actor.role != Role::Seller {
        return Err(AccessError::SellerRequired);
    }
    if !actor.is_seller_approved() {
        return Err(AccessError::SellerNotApproved);
    }
    Ok(())
}

pub fn require_owner(actor: &Identity, owner: UserId) -> Result<(), AccessError> {
    if is_owner(actor, owner) {
        Ok(())
    } else {
        Err(AccessError::NotOwner)
    }
}
