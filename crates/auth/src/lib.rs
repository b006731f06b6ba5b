//! `vendora-auth` — identity/role model and the pure access-policy boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod identity;
pub mod policy;
pub mod roles;

pub use identity::{ApplicationState, Identity, SellerProfile, SellerStats};
pub use policy::{AccessError, is_admin, is_approved_seller, is_owner};
pub use roles::Role;
