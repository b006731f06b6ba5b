//! In-memory store adapters for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use vendora_auth::{ApplicationState, Identity};
use vendora_core::{ProductId, UserId};
use vendora_products::{Product, Review};

use super::{IdentityStore, ProductStore, ReviewStore};

#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    inner: RwLock<HashMap<UserId, Identity>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn get(&self, id: UserId) -> Option<Identity> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<Identity> {
        let map = self.inner.read().ok()?;
        map.values().find(|i| i.email == email).cloned()
    }

    fn upsert(&self, identity: Identity) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(identity.id, identity);
        }
    }

    fn applicants(&self) -> Vec<Identity> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut rows: Vec<Identity> = map
            .values()
            .filter(|i| i.application != ApplicationState::NoApplication)
            .cloned()
            .collect();
        // Deterministic queue order for paging.
        rows.sort_by_key(|i| i.created_at);
        rows
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for InMemoryProductStore {
    fn get(&self, id: ProductId) -> Option<Product> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    fn upsert(&self, product: Product) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(product.id, product);
        }
    }

    fn list_by_seller(&self, seller_id: UserId) -> Vec<Product> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut rows: Vec<Product> = map
            .values()
            .filter(|p| p.seller_id == seller_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.created_at);
        rows
    }

    fn list_all(&self) -> Vec<Product> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut rows: Vec<Product> = map.values().cloned().collect();
        rows.sort_by_key(|p| p.created_at);
        rows
    }
}

#[derive(Debug, Default)]
pub struct InMemoryReviewStore {
    inner: RwLock<Vec<Review>>,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReviewStore for InMemoryReviewStore {
    fn add(&self, review: Review) {
        if let Ok(mut rows) = self.inner.write() {
            rows.push(review);
        }
    }

    fn for_product(&self, product_id: ProductId) -> Vec<Review> {
        let rows = match self.inner.read() {
            Ok(r) => r,
            Err(_) => return vec![],
        };
        rows.iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect()
    }
}
