//! Catalog filters and ordering.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use vendora_core::{DomainError, ProductId};
use vendora_products::Product;

/// Upper bound on page size for public listings.
pub const DEFAULT_LIMIT_CAP: usize = 100;

/// Optional filters on top of the public-visibility base filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProductFilters {
    /// Exact category match.
    pub category: Option<String>,
    /// Case-insensitive substring over title OR description.
    pub search: Option<String>,
}

/// Sort key for public listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedAt,
    Price,
    SoldCount,
    Rating,
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(SortKey::CreatedAt),
            "price" => Ok(SortKey::Price),
            "sold_count" => Ok(SortKey::SoldCount),
            "rating" => Ok(SortKey::Rating),
            other => Err(DomainError::validation(format!(
                "sort_by must be one of: created_at, price, sold_count, rating (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(DomainError::validation(format!(
                "sort_order must be 'asc' or 'desc' (got '{other}')"
            ))),
        }
    }
}

/// Does a product appear in the public catalog under these filters?
///
/// The visibility base filter is not optional: inactive or non-active-status
/// products never match, whatever the filters say.
pub fn matches(product: &Product, filters: &ProductFilters) -> bool {
    if !product.is_public() {
        return false;
    }

    if let Some(category) = &filters.category {
        if product.category.as_deref() != Some(category.as_str()) {
            return false;
        }
    }

    if let Some(search) = &filters.search {
        let needle = search.to_lowercase();
        let in_title = product.title.to_lowercase().contains(&needle);
        let in_description = product.description.to_lowercase().contains(&needle);
        if !in_title && !in_description {
            return false;
        }
    }

    true
}

/// Order products in place.
///
/// Ratings are derived data, so the caller supplies a lookup computed from
/// the review collection as of this query.
pub fn sort_products(
    products: &mut [Product],
    key: SortKey,
    direction: SortDirection,
    rating_of: impl Fn(ProductId) -> f64,
) {
    products.sort_by(|a, b| {
        let ordering = match key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::SoldCount => a.sold_count.cmp(&b.sold_count),
            SortKey::Rating => rating_of(a.id).total_cmp(&rating_of(b.id)),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
