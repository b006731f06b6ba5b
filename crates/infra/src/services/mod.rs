//! Application services.
//!
//! Each operation runs the same pipeline: the caller hands in a resolved
//! identity, the policy layer authorizes against the target's current state,
//! the domain crate executes the transition, and the store is updated.

mod catalog;
mod identity;
mod products;
mod sellers;

pub use catalog::CatalogService;
pub use identity::IdentityDirectory;
pub use products::ProductService;
pub use sellers::SellerWorkflow;
