//! Partial product updates.
//!
//! `ProductPatch` enumerates every externally mutable field, each wrapped in
//! an `Option`: absent fields are left untouched ("exclude-unset" merge).
//! `seller_id` and `sold_count` are deliberately not part of this struct, so
//! they cannot be set from the outside at all.

use serde::{Deserialize, Serialize};

use chrono::{DateTime, Utc};

use crate::error::ProductError;
use crate::product::{Product, ProductStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<u64>,
    pub compare_at_price: Option<u64>,
    pub category: Option<String>,
    pub stock_quantity: Option<i64>,
    pub is_active: Option<bool>,
    pub status: Option<ProductStatus>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn validate(&self) -> Result<(), ProductError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ProductError::validation("title cannot be empty"));
            }
            if title.chars().count() > 200 {
                return Err(ProductError::validation(
                    "title must be at most 200 characters",
                ));
            }
        }
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err(ProductError::validation("description cannot be empty"));
            }
        }
        if self.price == Some(0) {
            return Err(ProductError::validation("price must be positive"));
        }
        if let Some(stock) = self.stock_quantity {
            if stock < -1 {
                return Err(ProductError::validation(
                    "stock quantity must be -1 (unlimited) or non-negative",
                ));
            }
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

    /// Merge the present fields into `product`.
    ///
    /// Validation happens fully before the first field is written, so a
    /// failed patch leaves the product byte-for-byte unchanged.
    pub fn apply_to(&self, product: &mut Product, now: DateTime<Utc>) -> Result<(), ProductError> {
        self.validate()?;

        if let Some(title) = &self.title {
            product.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(short_description) = &self.short_description {
            product.short_description = Some(short_description.clone());
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(compare_at_price) = self.compare_at_price {
            product.compare_at_price = Some(compare_at_price);
        }
        if let Some(category) = &self.category {
            product.category = Some(category.clone());
        }
        if let Some(stock_quantity) = self.stock_quantity {
            product.stock_quantity = stock_quantity;
        }
        if let Some(is_active) = self.is_active {
            product.is_active = is_active;
        }
        if let Some(status) = self.status {
            product.set_status(status, now);
        }
        product.updated_at = now;

        Ok(())
    }
}
