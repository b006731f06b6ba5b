//! Infrastructure layer: collaborator contracts and application services.
//!
//! The domain crates are pure; this crate owns the seams to the outside
//! world (record stores, blob store) and the services that orchestrate
//! resolve → authorize → transition → persist for each operation.

pub mod blob;
pub mod services;
pub mod store;

#[cfg(test)]
mod integration_tests;

pub use blob::{BlobError, BlobRef, BlobStore, InMemoryBlobStore};
pub use services::{CatalogService, IdentityDirectory, ProductService, SellerWorkflow};
pub use store::{
    IdentityStore, InMemoryIdentityStore, InMemoryProductStore, InMemoryReviewStore, ProductStore,
    ReviewStore,
};
