use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use vendora_auth::{Identity, policy};
use vendora_core::{ProductId, UserId};
use vendora_products::{
    AssetRef, AssetUpload, NewProduct, Product, ProductError, ProductPatch, Review, UploadPolicy,
    asset,
};

use crate::blob::BlobStore;
use crate::store::{IdentityStore, ProductStore, ReviewStore};

/// Orchestrates the product lifecycle against the product store and the blob
/// store.
pub struct ProductService {
    products: Arc<dyn ProductStore>,
    identities: Arc<dyn IdentityStore>,
    reviews: Arc<dyn ReviewStore>,
    blobs: Arc<dyn BlobStore>,
    upload_policy: UploadPolicy,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductStore>,
        identities: Arc<dyn IdentityStore>,
        reviews: Arc<dyn ReviewStore>,
        blobs: Arc<dyn BlobStore>,
        upload_policy: UploadPolicy,
    ) -> Self {
        Self {
            products,
            identities,
            reviews,
            blobs,
            upload_policy,
        }
    }

    /// Create a listing. Only approved sellers may create; every input is
    /// validated before the first blob is stored.
    pub fn create(
        &self,
        actor: &Identity,
        input: NewProduct,
        file: AssetUpload,
        thumbnail: Option<AssetUpload>,
    ) -> Result<Product, ProductError> {
        if !policy::is_approved_seller(actor) {
            return Err(ProductError::SellerNotApproved);
        }
        input.validate()?;
        asset::validate_asset(&file, &self.upload_policy)?;
        if let Some(upload) = &thumbnail {
            asset::validate_thumbnail(upload, &self.upload_policy)?;
        }

        let reference = self.blobs.put(&file.bytes, &file.content_type);
        let stored = AssetRef {
            reference,
            size: file.size(),
            content_type: file.content_type.clone(),
        };
        let thumbnail_ref =
            thumbnail.map(|upload| self.blobs.put(&upload.bytes, &upload.content_type));

        let product = Product::create(actor.id, input, stored, thumbnail_ref, Utc::now())?;
        self.products.upsert(product.clone());
        self.bump_product_count(product.seller_id, 1);
        info!(product_id = %product.id, seller_id = %product.seller_id, "product created");

        Ok(product)
    }

    /// Partial update by the owner, with optional asset/thumbnail
    /// replacement.
    ///
    /// Replaced blobs are deleted best-effort after the record is updated;
    /// a failed delete is logged and never fails the request.
    pub fn update(
        &self,
        actor: &Identity,
        product_id: ProductId,
        patch: ProductPatch,
        new_file: Option<AssetUpload>,
        new_thumbnail: Option<AssetUpload>,
    ) -> Result<Product, ProductError> {
        let mut product = self.products.get(product_id).ok_or(ProductError::NotFound)?;
        policy::require_owner(actor, product.seller_id)?;

        if let Some(upload) = &new_file {
            asset::validate_asset(upload, &self.upload_policy)?;
        }
        if let Some(upload) = &new_thumbnail {
            asset::validate_thumbnail(upload, &self.upload_policy)?;
        }

        let now = Utc::now();
        patch.apply_to(&mut product, now)?;

        if let Some(upload) = new_file {
            let reference = self.blobs.put(&upload.bytes, &upload.content_type);
            let replaced = product.replace_asset(
                AssetRef {
                    reference,
                    size: upload.size(),
                    content_type: upload.content_type.clone(),
                },
                now,
            );
            self.discard_blob(&replaced);
        }
        if let Some(upload) = new_thumbnail {
            let reference = self.blobs.put(&upload.bytes, &upload.content_type);
            if let Some(replaced) = product.replace_thumbnail(reference, now) {
                self.discard_blob(&replaced);
            }
        }

        self.products.upsert(product.clone());
        Ok(product)
    }

    /// Soft delete by the owner: archive and hide. The stored blobs stay.
    pub fn delete(&self, actor: &Identity, product_id: ProductId) -> Result<(), ProductError> {
        let mut product = self.products.get(product_id).ok_or(ProductError::NotFound)?;
        policy::require_owner(actor, product.seller_id)?;

        product.archive(Utc::now());
        self.products.upsert(product.clone());
        self.bump_product_count(product.seller_id, -1);
        info!(product_id = %product.id, "product archived");

        Ok(())
    }

    /// Public detail lookup. Hidden and missing products are
    /// indistinguishable: both are `NotFound`.
    pub fn get_public(&self, product_id: ProductId) -> Result<(Product, Vec<Review>), ProductError> {
        let product = self
            .products
            .get(product_id)
            .filter(Product::is_public)
            .ok_or(ProductError::NotFound)?;
        let reviews = self.reviews.for_product(product.id);
        Ok((product, reviews))
    }

    /// Reviews attached to a product, for derived ratings in owner views.
    pub fn reviews_for(&self, product_id: ProductId) -> Vec<Review> {
        self.reviews.for_product(product_id)
    }

    /// Every product of the acting seller, regardless of status/visibility.
    pub fn list_mine(&self, actor: &Identity) -> Result<Vec<Product>, ProductError> {
        policy::require_approved_seller(actor)?;
        Ok(self.products.list_by_seller(actor.id))
    }

    /// Admin moderation: take an active listing down.
    pub fn suspend(&self, admin: &Identity, product_id: ProductId) -> Result<Product, ProductError> {
        policy::require_admin(admin)?;
        let mut product = self.products.get(product_id).ok_or(ProductError::NotFound)?;
        product.suspend(Utc::now())?;
        self.products.upsert(product.clone());
        info!(product_id = %product.id, "product suspended");
        Ok(product)
    }

    /// Admin moderation: put a suspended listing back on sale.
    pub fn reinstate(
        &self,
        admin: &Identity,
        product_id: ProductId,
    ) -> Result<Product, ProductError> {
        policy::require_admin(admin)?;
        let mut product = self.products.get(product_id).ok_or(ProductError::NotFound)?;
        product.reinstate(Utc::now())?;
        self.products.upsert(product.clone());
        info!(product_id = %product.id, "product reinstated");
        Ok(product)
    }

    /// Best-effort cleanup of a replaced blob. Failures are logged, never
    /// surfaced.
    fn discard_blob(&self, reference: &str) {
        if let Err(error) = self.blobs.delete(reference) {
            warn!(%reference, %error, "best-effort delete of replaced blob failed");
        }
    }

    fn bump_product_count(&self, seller_id: UserId, delta: i32) {
        let Some(mut identity) = self.identities.get(seller_id) else {
            return;
        };
        identity.stats.total_products = if delta >= 0 {
            identity.stats.total_products.saturating_add(delta as u32)
        } else {
            identity.stats.total_products.saturating_sub(delta.unsigned_abs())
        };
        identity.touch(Utc::now());
        self.identities.upsert(identity);
    }
}
