//! Infrastructure wiring: in-memory stores + application services.

use std::sync::Arc;

use vendora_auth::Role;
use vendora_infra::{
    CatalogService, IdentityDirectory, InMemoryBlobStore, InMemoryIdentityStore,
    InMemoryProductStore, InMemoryReviewStore, ProductService, SellerWorkflow,
};
use vendora_products::UploadPolicy;

pub struct AppServices {
    pub directory: Arc<IdentityDirectory>,
    pub sellers: SellerWorkflow,
    pub products: ProductService,
    pub catalog: CatalogService,
}

/// Wire the in-memory dev/test stack and seed the initial admin identity.
pub fn build_services() -> AppServices {
    let identities = Arc::new(InMemoryIdentityStore::new());
    let products = Arc::new(InMemoryProductStore::new());
    let reviews = Arc::new(InMemoryReviewStore::new());
    let blobs = Arc::new(InMemoryBlobStore::new());

    let directory = Arc::new(IdentityDirectory::new(identities.clone()));

    seed_admin(&directory, &identities);

    AppServices {
        sellers: SellerWorkflow::new(identities.clone()),
        products: ProductService::new(
            products.clone(),
            identities.clone(),
            reviews.clone(),
            blobs,
            UploadPolicy::default(),
        ),
        catalog: CatalogService::new(products, identities, reviews),
        directory,
    }
}

/// The in-memory store starts empty, so every boot needs one admin to review
/// applications. Its id doubles as the bearer token.
fn seed_admin(directory: &IdentityDirectory, identities: &Arc<InMemoryIdentityStore>) {
    use vendora_infra::IdentityStore;

    match directory.register("admin@vendora.local", Some("admin".into())) {
        Ok(mut admin) => {
            admin.role = Role::Admin;
            identities.upsert(admin.clone());
            tracing::info!(admin_id = %admin.id, "seeded admin identity");
        }
        Err(error) => tracing::warn!(%error, "failed to seed admin identity"),
    }
}
