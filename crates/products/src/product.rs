use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::{ProductId, UserId};

use crate::asset::AssetRef;
use crate::error::ProductError;

/// Product status lifecycle.
///
/// `is_active` on the product is an orthogonal visibility toggle on top of
/// this status; a product is publicly visible only when it is active *and*
/// the status is `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Seller still editing.
    Draft,
    /// Awaiting admin approval.
    Pending,
    /// Published and for sale.
    Active,
    /// Taken down by an admin.
    Suspended,
    /// No longer for sale (terminal).
    Archived,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Pending => "pending",
            ProductStatus::Active => "active",
            ProductStatus::Suspended => "suspended",
            ProductStatus::Archived => "archived",
        }
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProductStatus::Draft),
            "pending" => Ok(ProductStatus::Pending),
            "active" => Ok(ProductStatus::Active),
            "suspended" => Ok(ProductStatus::Suspended),
            "archived" => Ok(ProductStatus::Archived),
            other => Err(ProductError::validation(format!(
                "unknown product status: {other}"
            ))),
        }
    }
}

/// Input for creating a product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    /// Price in the smallest currency unit; must be positive.
    pub price: u64,
    pub compare_at_price: Option<u64>,
    pub category: Option<String>,
    /// −1 means unlimited.
    pub stock_quantity: i64,
    /// Initial lifecycle status; listings go live immediately by default.
    pub status: Option<ProductStatus>,
}

impl NewProduct {
    /// Callers that store blobs before building the record use this to keep
    /// all validation ahead of any side effect.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.title.trim().is_empty() {
            return Err(ProductError::validation("title cannot be empty"));
        }
        if self.title.chars().count() > 200 {
            return Err(ProductError::validation(
                "title must be at most 200 characters",
            ));
        }
        if self.description.trim().is_empty() {
            return Err(ProductError::validation("description cannot be empty"));
        }
        if self.price == 0 {
            return Err(ProductError::validation("price must be positive"));
        }
        if self.stock_quantity < -1 {
            return Err(ProductError::validation(
                "stock quantity must be -1 (unlimited) or non-negative",
            ));
        }
        if let Some(category) = &self.category {
            if category.chars().count() > 100 {
                return Err(ProductError::validation(
                    "category must be at most 100 characters",
                ));
            }
        }
        Ok(())
    }
}

/// A digital product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Owning seller; immutable after creation.
    pub seller_id: UserId,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub category: Option<String>,
    pub price: u64,
    pub compare_at_price: Option<u64>,
    pub status: ProductStatus,
    pub is_active: bool,
    pub asset: AssetRef,
    pub thumbnail: Option<String>,
    pub stock_quantity: i64,
    pub sold_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Build a new listing from validated input and an already-stored asset.
    pub fn create(
        seller_id: UserId,
        input: NewProduct,
        asset: AssetRef,
        thumbnail: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ProductError> {
        input.validate()?;

        let status = input.status.unwrap_or(ProductStatus::Active);
        Ok(Self {
            id: ProductId::new(),
            seller_id,
            title: input.title.trim().to_string(),
            description: input.description,
            short_description: input.short_description,
            category: input.category,
            price: input.price,
            compare_at_price: input.compare_at_price,
            status,
            is_active: true,
            asset,
            thumbnail,
            stock_quantity: input.stock_quantity,
            sold_count: 0,
            created_at: now,
            updated_at: now,
            published_at: (status == ProductStatus::Active).then_some(now),
        })
    }

    /// A product is publicly visible only when both toggles agree.
    pub fn is_public(&self) -> bool {
        self.is_active && self.status == ProductStatus::Active
    }

    /// Soft delete: archive the listing and hide it. Idempotent. The stored
    /// blobs are intentionally left in place.
    pub fn archive(&mut self, now: DateTime<Utc>) {
        self.status = ProductStatus::Archived;
        self.is_active = false;
        self.updated_at = now;
    }

    /// Admin moderation: take a published listing down.
    pub fn suspend(&mut self, now: DateTime<Utc>) -> Result<(), ProductError> {
        if self.status != ProductStatus::Active {
            return Err(ProductError::InvalidTransition(format!(
                "only active products can be suspended (status is {})",
                self.status
            )));
        }
        self.status = ProductStatus::Suspended;
        self.updated_at = now;
        Ok(())
    }

    /// Admin moderation: put a suspended listing back on sale.
    pub fn reinstate(&mut self, now: DateTime<Utc>) -> Result<(), ProductError> {
        if self.status != ProductStatus::Suspended {
            return Err(ProductError::InvalidTransition(format!(
                "only suspended products can be reinstated (status is {})",
                self.status
            )));
        }
        self.status = ProductStatus::Active;
        self.updated_at = now;
        Ok(())
    }

    /// Change the lifecycle status, stamping `published_at` on the first
    /// transition to `Active`.
    pub fn set_status(&mut self, status: ProductStatus, now: DateTime<Utc>) {
        self.status = status;
        if status == ProductStatus::Active && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.updated_at = now;
    }

    /// Record a replacement asset, returning the previous blob reference so
    /// the caller can clean it up.
    pub fn replace_asset(&mut self, asset: AssetRef, now: DateTime<Utc>) -> String {
        let previous = core::mem::replace(&mut self.asset, asset).reference;
        self.updated_at = now;
        previous
    }

    /// Record a replacement thumbnail, returning the previous reference if
    /// there was one.
    pub fn replace_thumbnail(&mut self, reference: String, now: DateTime<Utc>) -> Option<String> {
        let previous = self.thumbnail.replace(reference);
        self.updated_at = now;
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn asset() -> AssetRef {
        AssetRef {
            reference: "blob://asset-1".into(),
            size: 1024,
            content_type: "application/pdf".into(),
        }
    }

    fn input() -> NewProduct {
        NewProduct {
            title: "Field Recording Pack".into(),
            description: "24 loops, 48kHz".into(),
            short_description: None,
            price: 1500,
            compare_at_price: None,
            category: Some("audio".into()),
            stock_quantity: -1,
            status: None,
        }
    }

    #[test]
    fn create_defaults_to_active_and_visible() {
        let product = Product::create(UserId::new(), input(), asset(), None, now()).unwrap();
        assert_eq!(product.status, ProductStatus::Active);
        assert!(product.is_active);
        assert!(product.is_public());
        assert!(product.published_at.is_some());
        assert_eq!(product.sold_count, 0);
    }

    #[test]
    fn create_honors_an_explicit_draft_status() {
        let mut draft = input();
        draft.status = Some(ProductStatus::Draft);
        let product = Product::create(UserId::new(), draft, asset(), None, now()).unwrap();
        assert_eq!(product.status, ProductStatus::Draft);
        assert!(product.is_active);
        assert!(!product.is_public());
        assert!(product.published_at.is_none());
    }

    #[test]
    fn create_rejects_zero_price() {
        let mut bad = input();
        bad.price = 0;
        let err = Product::create(UserId::new(), bad, asset(), None, now()).unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[test]
    fn create_rejects_invalid_stock() {
        let mut bad = input();
        bad.stock_quantity = -2;
        assert!(matches!(
            Product::create(UserId::new(), bad, asset(), None, now()),
            Err(ProductError::Validation(_))
        ));
    }

    #[test]
    fn archive_hides_the_product_and_is_idempotent() {
        let mut product = Product::create(UserId::new(), input(), asset(), None, now()).unwrap();
        product.archive(now());
        assert_eq!(product.status, ProductStatus::Archived);
        assert!(!product.is_active);
        assert!(!product.is_public());

        product.archive(now());
        assert_eq!(product.status, ProductStatus::Archived);
    }

    #[test]
    fn suspend_and_reinstate_round_trip() {
        let mut product = Product::create(UserId::new(), input(), asset(), None, now()).unwrap();

        product.suspend(now()).unwrap();
        assert_eq!(product.status, ProductStatus::Suspended);
        assert!(!product.is_public());

        product.reinstate(now()).unwrap();
        assert_eq!(product.status, ProductStatus::Active);
        assert!(product.is_public());
    }

    #[test]
    fn suspend_requires_an_active_product() {
        let mut draft = input();
        draft.status = Some(ProductStatus::Draft);
        let mut product = Product::create(UserId::new(), draft, asset(), None, now()).unwrap();
        assert!(matches!(
            product.suspend(now()),
            Err(ProductError::InvalidTransition(_))
        ));
    }

    #[test]
    fn reinstate_requires_a_suspended_product() {
        let mut product = Product::create(UserId::new(), input(), asset(), None, now()).unwrap();
        assert!(matches!(
            product.reinstate(now()),
            Err(ProductError::InvalidTransition(_))
        ));
    }

    #[test]
    fn first_activation_stamps_published_at_once() {
        let mut draft = input();
        draft.status = Some(ProductStatus::Draft);
        let mut product = Product::create(UserId::new(), draft, asset(), None, now()).unwrap();
        assert!(product.published_at.is_none());

        product.set_status(ProductStatus::Active, now());
        let first = product.published_at.unwrap();

        product.set_status(ProductStatus::Draft, now());
        product.set_status(ProductStatus::Active, now());
        assert_eq!(product.published_at.unwrap(), first);
    }

    #[test]
    fn replace_asset_returns_the_previous_reference() {
        let mut product = Product::create(UserId::new(), input(), asset(), None, now()).unwrap();
        let old = product.replace_asset(
            AssetRef {
                reference: "blob://asset-2".into(),
                size: 2048,
                content_type: "application/zip".into(),
            },
            now(),
        );
        assert_eq!(old, "blob://asset-1");
        assert_eq!(product.asset.reference, "blob://asset-2");
        assert_eq!(product.asset.content_type, "application/zip");
    }
}
