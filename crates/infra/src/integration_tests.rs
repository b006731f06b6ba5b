//! End-to-end scenarios over the in-memory adapters.

use std::sync::Arc;

use vendora_auth::{ApplicationState, Identity, Role};
use vendora_catalog::{ProductFilters, SortDirection, SortKey};
use vendora_core::Page;
use vendora_products::{
    AssetUpload, NewProduct, ProductError, ProductPatch, ProductStatus, UploadPolicy,
};
use vendora_sellers::{ApplicationError, ApplicationStatus, ReviewDecision, SellerApplication};

use crate::blob::{BlobStore, InMemoryBlobStore};
use crate::services::{CatalogService, IdentityDirectory, ProductService, SellerWorkflow};
use crate::store::{
    IdentityStore, InMemoryIdentityStore, InMemoryProductStore, InMemoryReviewStore, ProductStore,
};

struct Harness {
    identities: Arc<InMemoryIdentityStore>,
    products: Arc<InMemoryProductStore>,
    blobs: Arc<InMemoryBlobStore>,
    directory: IdentityDirectory,
    workflow: SellerWorkflow,
    desk: ProductService,
    catalog: CatalogService,
}

fn harness() -> Harness {
    let identities = Arc::new(InMemoryIdentityStore::new());
    let products = Arc::new(InMemoryProductStore::new());
    let reviews = Arc::new(InMemoryReviewStore::new());
    let blobs = Arc::new(InMemoryBlobStore::new());

    Harness {
        directory: IdentityDirectory::new(identities.clone()),
        workflow: SellerWorkflow::new(identities.clone()),
        desk: ProductService::new(
            products.clone(),
            identities.clone(),
            reviews.clone(),
            blobs.clone(),
            UploadPolicy::default(),
        ),
        catalog: CatalogService::new(products.clone(), identities.clone(), reviews.clone()),
        identities,
        products,
        blobs,
    }
}

fn admin(h: &Harness) -> Identity {
    if let Some(existing) = h.identities.find_by_email("admin@example.com") {
        return existing;
    }
    let mut identity = h.directory.register("admin@example.com", None).unwrap();
    identity.role = Role::Admin;
    h.identities.upsert(identity.clone());
    identity
}

fn application(store_name: &str) -> SellerApplication {
    SellerApplication {
        store_name: store_name.into(),
        bio: "10+ chars bio".into(),
        address: "123 Main St, City".into(),
        tax_id: None,
        terms_accepted: true,
    }
}

fn pdf_upload() -> AssetUpload {
    AssetUpload {
        filename: Some("guide.pdf".into()),
        content_type: "application/pdf".into(),
        bytes: vec![0u8; 2048],
    }
}

fn png_upload() -> AssetUpload {
    AssetUpload {
        filename: Some("cover.png".into()),
        content_type: "image/png".into(),
        bytes: vec![0u8; 256],
    }
}

fn new_product(title: &str) -> NewProduct {
    NewProduct {
        title: title.into(),
        description: format!("{title}, digital download"),
        short_description: None,
        price: 1900,
        compare_at_price: None,
        category: Some("guides".into()),
        stock_quantity: -1,
        status: None,
    }
}

fn approved_seller(h: &Harness, email: &str, store_name: &str) -> Identity {
    let buyer = h.directory.register(email, None).unwrap();
    let pending = h.workflow.apply(&buyer, application(store_name)).unwrap();
    h.workflow
        .review(&admin(h), pending.id, ReviewDecision::Approved)
        .unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Seller workflow scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn scenario_apply_approve_then_create() {
    let h = harness();
    let buyer = h.directory.register("x@example.com", Some("x".into())).unwrap();

    let pending = h.workflow.apply(&buyer, application("Shop")).unwrap();
    assert_eq!(h.workflow.status_of(&pending).unwrap(), ApplicationStatus::Pending);

    let approved = h
        .workflow
        .review(&admin(&h), pending.id, ReviewDecision::Approved)
        .unwrap();
    assert_eq!(h.workflow.status_of(&approved).unwrap(), ApplicationStatus::Approved);
    assert_eq!(approved.role, Role::Seller);
    assert!(approved.is_seller_approved());

    let product = h
        .desk
        .create(&approved, new_product("City Guide"), pdf_upload(), None)
        .unwrap();
    assert_eq!(product.status, ProductStatus::Active);
    assert!(product.is_active);
    assert!(h.blobs.contains(&product.asset.reference));

    // The seller's aggregate product count followed along.
    let refreshed = h.identities.get(approved.id).unwrap();
    assert_eq!(refreshed.stats.total_products, 1);
}

#[test]
fn scenario_reject_reverts_and_blocks_create() {
    let h = harness();
    let buyer = h.directory.register("x@example.com", None).unwrap();

    let pending = h.workflow.apply(&buyer, application("Shop")).unwrap();
    let rejected = h
        .workflow
        .review(&admin(&h), pending.id, ReviewDecision::Rejected)
        .unwrap();

    assert_eq!(rejected.role, Role::Buyer);
    assert!(rejected.seller.is_none());
    assert_eq!(rejected.application, ApplicationState::Rejected);
    assert_eq!(
        h.workflow.status_of(&rejected).unwrap_err(),
        ApplicationError::NoApplicationFound
    );

    let err = h
        .desk
        .create(&rejected, new_product("City Guide"), pdf_upload(), None)
        .unwrap_err();
    assert_eq!(err, ProductError::SellerNotApproved);
}

#[test]
fn scenario_update_by_a_different_seller_is_denied() {
    let h = harness();
    let seller_y = approved_seller(&h, "y@example.com", "Y Store");
    let seller_z = approved_seller(&h, "z@example.com", "Z Store");

    let product = h
        .desk
        .create(&seller_y, new_product("Loops"), pdf_upload(), None)
        .unwrap();

    let patch = ProductPatch {
        price: Some(10),
        ..Default::default()
    };
    let err = h
        .desk
        .update(&seller_z, product.id, patch, None, None)
        .unwrap_err();
    assert_eq!(err, ProductError::NotOwner);

    let unchanged = h.products.get(product.id).unwrap();
    assert_eq!(unchanged, product);
}

#[test]
fn create_by_unapproved_seller_persists_nothing() {
    let h = harness();
    let buyer = h.directory.register("b@example.com", None).unwrap();

    let err = h
        .desk
        .create(&buyer, new_product("Nope"), pdf_upload(), None)
        .unwrap_err();
    assert_eq!(err, ProductError::SellerNotApproved);
    assert!(h.products.list_all().is_empty());
    assert!(h.blobs.is_empty());
}

#[test]
fn oversized_upload_is_rejected_before_any_blob_is_stored() {
    let h = harness();
    let seller = approved_seller(&h, "s@example.com", "S Store");

    let desk = ProductService::new(
        h.products.clone(),
        h.identities.clone(),
        Arc::new(InMemoryReviewStore::new()),
        h.blobs.clone(),
        UploadPolicy {
            max_asset_bytes: 16,
            max_thumbnail_bytes: 16,
        },
    );

    let err = desk
        .create(&seller, new_product("Big"), pdf_upload(), None)
        .unwrap_err();
    assert!(matches!(err, ProductError::AssetTooLarge { .. }));
    assert!(h.blobs.is_empty());
    assert!(h.products.list_all().is_empty());
}

#[test]
fn stale_snapshot_double_apply_is_last_write_wins() {
    let h = harness();
    let registered = h.directory.register("race@example.com", None).unwrap();

    // Two requests resolve the same identity before either writes.
    let snapshot_a = h.directory.resolve(registered.id).unwrap();
    let snapshot_b = h.directory.resolve(registered.id).unwrap();

    h.workflow.apply(&snapshot_a, application("First Shop")).unwrap();
    // The second apply sees a stale buyer snapshot, so it also passes the
    // preconditions and overwrites the first application.
    h.workflow.apply(&snapshot_b, application("Second Shop")).unwrap();

    let stored = h.identities.get(registered.id).unwrap();
    assert_eq!(stored.application, ApplicationState::Pending);
    assert_eq!(stored.seller.unwrap().store_name, "Second Shop");
}

#[test]
fn admin_queue_filters_on_the_stored_state() {
    let h = harness();
    let reviewer = admin(&h);

    let pending = h.directory.register("p@example.com", None).unwrap();
    h.workflow.apply(&pending, application("Pending Shop")).unwrap();

    let approved = h.directory.register("a@example.com", None).unwrap();
    let approved = h.workflow.apply(&approved, application("Approved Shop")).unwrap();
    h.workflow
        .review(&reviewer, approved.id, ReviewDecision::Approved)
        .unwrap();

    let rejected = h.directory.register("r@example.com", None).unwrap();
    let rejected = h.workflow.apply(&rejected, application("Rejected Shop")).unwrap();
    h.workflow
        .review(&reviewer, rejected.id, ReviewDecision::Rejected)
        .unwrap();

    let page = Page::default();
    let all = h.workflow.list_applications(None, page);
    assert_eq!(all.len(), 3);

    let pending_only = h.workflow.list_applications(Some(ApplicationStatus::Pending), page);
    assert_eq!(pending_only.len(), 1);
    assert_eq!(pending_only[0].seller.as_ref().unwrap().store_name, "Pending Shop");

    // Rejected applications remain listable even though the identity is a
    // buyer again.
    let rejected_only = h.workflow.list_applications(Some(ApplicationStatus::Rejected), page);
    assert_eq!(rejected_only.len(), 1);
    assert_eq!(rejected_only[0].role, Role::Buyer);
}

// ─────────────────────────────────────────────────────────────────────────────
// Product lifecycle scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_patch_changes_no_stored_field() {
    let h = harness();
    let seller = approved_seller(&h, "s@example.com", "S Store");
    let product = h
        .desk
        .create(&seller, new_product("Loops"), pdf_upload(), None)
        .unwrap();

    let updated = h
        .desk
        .update(&seller, product.id, ProductPatch::default(), None, None)
        .unwrap();

    assert_eq!(updated.title, product.title);
    assert_eq!(updated.description, product.description);
    assert_eq!(updated.price, product.price);
    assert_eq!(updated.status, product.status);
    assert_eq!(updated.is_active, product.is_active);
    assert_eq!(updated.asset, product.asset);
    assert!(updated.updated_at >= product.updated_at);
}

#[test]
fn replacing_the_asset_swaps_exactly_one_blob() {
    let h = harness();
    let seller = approved_seller(&h, "s@example.com", "S Store");
    let product = h
        .desk
        .create(&seller, new_product("Loops"), pdf_upload(), None)
        .unwrap();
    let old_reference = product.asset.reference.clone();

    let replacement = AssetUpload {
        filename: Some("loops-v2.zip".into()),
        content_type: "application/zip".into(),
        bytes: vec![1u8; 4096],
    };
    let updated = h
        .desk
        .update(&seller, product.id, ProductPatch::default(), Some(replacement), None)
        .unwrap();

    assert_ne!(updated.asset.reference, old_reference);
    assert_eq!(updated.asset.content_type, "application/zip");
    assert_eq!(updated.asset.size, 4096);
    assert!(!h.blobs.contains(&old_reference));
    assert!(h.blobs.contains(&updated.asset.reference));
    assert_eq!(h.blobs.len(), 1);
}

#[test]
fn failed_blob_delete_never_fails_the_update() {
    let h = harness();
    let seller = approved_seller(&h, "s@example.com", "S Store");
    let product = h
        .desk
        .create(&seller, new_product("Loops"), pdf_upload(), None)
        .unwrap();

    // Yank the old blob out from under the service so the best-effort delete
    // during replacement fails.
    h.blobs.delete(&product.asset.reference).unwrap();

    let updated = h
        .desk
        .update(
            &seller,
            product.id,
            ProductPatch::default(),
            Some(pdf_upload()),
            None,
        )
        .unwrap();

    assert_ne!(updated.asset.reference, product.asset.reference);
    assert!(h.blobs.contains(&updated.asset.reference));
    assert_eq!(
        h.products.get(product.id).unwrap().asset.reference,
        updated.asset.reference
    );
}

#[test]
fn delete_archives_but_keeps_the_blobs() {
    let h = harness();
    let seller = approved_seller(&h, "s@example.com", "S Store");
    let product = h
        .desk
        .create(&seller, new_product("Loops"), pdf_upload(), Some(png_upload()))
        .unwrap();

    h.desk.delete(&seller, product.id).unwrap();

    let archived = h.products.get(product.id).unwrap();
    assert_eq!(archived.status, ProductStatus::Archived);
    assert!(!archived.is_active);
    assert!(h.blobs.contains(&archived.asset.reference));
    assert!(h.blobs.contains(archived.thumbnail.as_ref().unwrap()));

    let refreshed = h.identities.get(seller.id).unwrap();
    assert_eq!(refreshed.stats.total_products, 0);
}

#[test]
fn public_lookup_folds_hidden_and_missing_into_not_found() {
    let h = harness();
    let seller = approved_seller(&h, "s@example.com", "S Store");
    let product = h
        .desk
        .create(&seller, new_product("Loops"), pdf_upload(), None)
        .unwrap();

    assert!(h.desk.get_public(product.id).is_ok());

    let patch = ProductPatch {
        is_active: Some(false),
        ..Default::default()
    };
    h.desk.update(&seller, product.id, patch, None, None).unwrap();
    assert_eq!(h.desk.get_public(product.id).unwrap_err(), ProductError::NotFound);

    assert_eq!(
        h.desk.get_public(vendora_core::ProductId::new()).unwrap_err(),
        ProductError::NotFound
    );
}

#[test]
fn moderation_suspend_and_reinstate() {
    let h = harness();
    let reviewer = admin(&h);
    let seller = approved_seller(&h, "s@example.com", "S Store");
    let product = h
        .desk
        .create(&seller, new_product("Loops"), pdf_upload(), None)
        .unwrap();

    let err = h.desk.suspend(&seller, product.id).unwrap_err();
    assert_eq!(err, ProductError::AdminRequired);

    h.desk.suspend(&reviewer, product.id).unwrap();
    assert_eq!(h.desk.get_public(product.id).unwrap_err(), ProductError::NotFound);

    h.desk.reinstate(&reviewer, product.id).unwrap();
    assert!(h.desk.get_public(product.id).is_ok());
}

#[test]
fn list_mine_returns_every_state_but_needs_approval() {
    let h = harness();
    let seller = approved_seller(&h, "s@example.com", "S Store");

    let mut draft = new_product("Draft");
    draft.status = Some(ProductStatus::Draft);
    h.desk.create(&seller, draft, pdf_upload(), None).unwrap();

    h.desk
        .create(&seller, new_product("Live"), pdf_upload(), None)
        .unwrap();
    let archived = h
        .desk
        .create(&seller, new_product("Gone"), pdf_upload(), None)
        .unwrap();
    h.desk.delete(&seller, archived.id).unwrap();

    let mine = h.desk.list_mine(&seller).unwrap();
    assert_eq!(mine.len(), 3);

    let buyer = h.directory.register("b@example.com", None).unwrap();
    assert_eq!(h.desk.list_mine(&buyer).unwrap_err(), ProductError::SellerNotApproved);
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn catalog_lists_only_public_rows_with_the_seller_joined() {
    let h = harness();
    let seller = approved_seller(&h, "s@example.com", "S Store");

    h.desk
        .create(&seller, new_product("Visible"), pdf_upload(), None)
        .unwrap();

    let mut hidden_input = new_product("Hidden Draft");
    hidden_input.status = Some(ProductStatus::Draft);
    h.desk.create(&seller, hidden_input, pdf_upload(), None).unwrap();

    let suspended = h
        .desk
        .create(&seller, new_product("Suspended"), pdf_upload(), None)
        .unwrap();
    h.desk.suspend(&admin(&h), suspended.id).unwrap();

    let cards = h.catalog.list_public(
        &ProductFilters::default(),
        SortKey::default(),
        SortDirection::default(),
        Page::default(),
    );

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Visible");
    assert_eq!(cards[0].seller_name, "S Store");
}

#[test]
fn catalog_search_and_price_sort() {
    let h = harness();
    let seller = approved_seller(&h, "s@example.com", "S Store");

    let mut cheap = new_product("Ambient pads");
    cheap.price = 500;
    h.desk.create(&seller, cheap, pdf_upload(), None).unwrap();

    let mut dear = new_product("Ambient textures");
    dear.price = 2500;
    h.desk.create(&seller, dear, pdf_upload(), None).unwrap();

    h.desk
        .create(&seller, new_product("Drum kit"), pdf_upload(), None)
        .unwrap();

    let filters = ProductFilters {
        search: Some("AMBIENT".into()),
        ..Default::default()
    };
    let cards = h.catalog.list_public(&filters, SortKey::Price, SortDirection::Asc, Page::default());

    let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Ambient pads", "Ambient textures"]);
}
