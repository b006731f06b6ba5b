//! Public projection of a product listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_auth::Identity;
use vendora_core::ProductId;
use vendora_products::{Product, Review, average_rating, review_count};

/// The public-safe shape of a listing row.
///
/// Deliberately excludes seller-private fields: the main asset reference,
/// file metadata and stock internals never leave the owner's own views. The
/// seller name and rating are joined live at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub short_description: Option<String>,
    pub price: u64,
    pub compare_at_price: Option<u64>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    pub seller_name: String,
    pub seller_rating: f64,
    pub sold_count: u64,
    pub average_rating: f64,
    pub review_count: usize,
    pub created_at: DateTime<Utc>,
}

impl ProductCard {
    pub fn project(product: &Product, seller: Option<&Identity>, reviews: &[Review]) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            short_description: product.short_description.clone(),
            price: product.price,
            compare_at_price: product.compare_at_price,
            category: product.category.clone(),
            thumbnail: product.thumbnail.clone(),
            seller_name: seller.map(|s| s.display_name().to_string()).unwrap_or_default(),
            seller_rating: seller.map(|s| s.stats.seller_rating).unwrap_or(0.0),
            sold_count: product.sold_count,
            average_rating: average_rating(reviews),
            review_count: review_count(reviews),
            created_at: product.created_at,
        }
    }
}
