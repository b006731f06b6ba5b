//! Product reviews and the ratings derived from them.
//!
//! Ratings are computed from the review collection at query time; nothing is
//! cached or stored on the product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::{ProductId, ReviewId, UserId};

use crate::error::ProductError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub reviewer: UserId,
    /// 1..=5 stars.
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        product_id: ProductId,
        reviewer: UserId,
        rating: u8,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ProductError> {
        if !(1..=5).contains(&rating) {
            return Err(ProductError::validation("rating must be between 1 and 5"));
        }
        Ok(Self {
            id: ReviewId::new(),
            product_id,
            reviewer,
            rating,
            comment,
            created_at: now,
        })
    }
}

/// Mean rating over a review collection; 0.0 when there are none.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(sum) / reviews.len() as f64
}

pub fn review_count(reviews: &[Review]) -> usize {
    reviews.len()
}
