//! Record-store contracts.
//!
//! The persistent store is an external collaborator: these traits capture
//! exactly the operations the services need (get by id, full-record upsert
//! with last-write-wins semantics, and a few typed listings). Soft delete is
//! a field update, never a store operation. The in-memory adapters back the
//! dev/test wiring.

use vendora_auth::Identity;
use vendora_core::{ProductId, UserId};
use vendora_products::{Product, Review};

mod memory;

pub use memory::{InMemoryIdentityStore, InMemoryProductStore, InMemoryReviewStore};

/// Store of user identities.
pub trait IdentityStore: Send + Sync {
    fn get(&self, id: UserId) -> Option<Identity>;

    fn find_by_email(&self, email: &str) -> Option<Identity>;

    /// Insert or fully replace the record (last-write-wins).
    fn upsert(&self, identity: Identity);

    /// Identities with a seller application on record (any state but
    /// `NoApplication`), for the admin review queue.
    fn applicants(&self) -> Vec<Identity>;
}

/// Store of product listings.
pub trait ProductStore: Send + Sync {
    fn get(&self, id: ProductId) -> Option<Product>;

    /// Insert or fully replace the record (last-write-wins).
    fn upsert(&self, product: Product);

    fn list_by_seller(&self, seller_id: UserId) -> Vec<Product>;

    fn list_all(&self) -> Vec<Product>;
}

/// Store of product reviews (read-mostly collaborator for derived ratings).
pub trait ReviewStore: Send + Sync {
    fn add(&self, review: Review);

    fn for_product(&self, product_id: ProductId) -> Vec<Review>;
}
