//! `vendora-sellers` — the seller application workflow.
//!
//! A buyer applies to become a seller; an admin approves or rejects the
//! application. The transitions here are pure functions over [`Identity`];
//! loading and persisting the record is the caller's concern.

pub mod application;

pub use application::{
    ApplicationError, ApplicationStatus, ReviewDecision, SellerApplication, apply, review,
    status_of,
};

pub use vendora_auth::Identity;
