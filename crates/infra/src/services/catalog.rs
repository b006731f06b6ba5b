use std::collections::HashMap;
use std::sync::Arc;

use vendora_catalog::{DEFAULT_LIMIT_CAP, ProductCard, ProductFilters, SortDirection, SortKey, query};
use vendora_core::{Page, ProductId};
use vendora_products::{Product, average_rating};

use crate::store::{IdentityStore, ProductStore, ReviewStore};

/// Public catalog listing: filter, sort, page, project.
pub struct CatalogService {
    products: Arc<dyn ProductStore>,
    identities: Arc<dyn IdentityStore>,
    reviews: Arc<dyn ReviewStore>,
}

impl CatalogService {
    pub fn new(
        products: Arc<dyn ProductStore>,
        identities: Arc<dyn IdentityStore>,
        reviews: Arc<dyn ReviewStore>,
    ) -> Self {
        Self {
            products,
            identities,
            reviews,
        }
    }

    pub fn list_public(
        &self,
        filters: &ProductFilters,
        sort_by: SortKey,
        sort_order: SortDirection,
        page: Page,
    ) -> Vec<ProductCard> {
        let mut rows: Vec<Product> = self
            .products
            .list_all()
            .into_iter()
            .filter(|product| query::matches(product, filters))
            .collect();

        // Ratings are derived from the review collection as of this query.
        let ratings: HashMap<ProductId, f64> = rows
            .iter()
            .map(|product| {
                (
                    product.id,
                    average_rating(&self.reviews.for_product(product.id)),
                )
            })
            .collect();

        query::sort_products(&mut rows, sort_by, sort_order, |id| {
            ratings.get(&id).copied().unwrap_or(0.0)
        });

        let rows = page.clamped(DEFAULT_LIMIT_CAP).slice(rows);

        rows.iter()
            .map(|product| {
                let seller = self.identities.get(product.seller_id);
                let reviews = self.reviews.for_product(product.id);
                ProductCard::project(product, seller.as_ref(), &reviews)
            })
            .collect()
    }
}
