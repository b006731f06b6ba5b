//! Request/response DTOs and JSON/multipart mapping helpers.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_auth::{ApplicationState, Identity};
use vendora_core::{ProductId, UserId};
use vendora_products::{
    AssetUpload, NewProduct, Product, ProductPatch, ProductStatus, Review, average_rating,
    canonical_extension, review_count,
};

use crate::app::errors::json_error;

// ─────────────────────────────────────────────────────────────────────────────
// Identities
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub id: UserId,
    pub email: String,
    pub username: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl IdentityResponse {
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            username: identity.username.clone(),
            role: identity.role.as_str().to_string(),
            created_at: identity.created_at,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Seller applications
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SellerApplicationRequest {
    pub store_name: String,
    pub bio: String,
    pub address: String,
    pub tax_id: Option<String>,
    pub terms_accepted: bool,
}

impl SellerApplicationRequest {
    pub fn into_application(self) -> vendora_sellers::SellerApplication {
        vendora_sellers::SellerApplication {
            store_name: self.store_name,
            bio: self.bio,
            address: self.address,
            tax_id: self.tax_id,
            terms_accepted: self.terms_accepted,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SellerApplicationResponse {
    pub id: UserId,
    pub email: String,
    pub store_name: String,
    pub bio: String,
    pub address: String,
    pub tax_id: Option<String>,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row label for the stored application state; identities with no
/// application on record produce nothing.
pub fn application_status_label(state: ApplicationState) -> Option<&'static str> {
    match state {
        ApplicationState::NoApplication => None,
        ApplicationState::Pending => Some("pending"),
        ApplicationState::Approved => Some("approved"),
        ApplicationState::Rejected => Some("rejected"),
    }
}

impl SellerApplicationResponse {
    pub fn from_identity(identity: &Identity, status: &'static str) -> Self {
        let profile = identity.seller.as_ref();
        Self {
            id: identity.id,
            email: identity.email.clone(),
            store_name: profile.map(|p| p.store_name.clone()).unwrap_or_default(),
            bio: profile.map(|p| p.bio.clone()).unwrap_or_default(),
            address: profile.map(|p| p.address.clone()).unwrap_or_default(),
            tax_id: profile.and_then(|p| p.tax_id.clone()),
            status,
            created_at: identity.created_at,
            updated_at: identity.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SellerProfileResponse {
    pub id: UserId,
    pub email: String,
    pub username: Option<String>,
    pub store_name: String,
    pub bio: String,
    pub address: String,
    pub tax_id: Option<String>,
    pub is_seller_approved: bool,
    pub seller_verified: bool,
    pub total_sales: f64,
    pub total_products: u32,
    pub seller_rating: f64,
    pub created_at: DateTime<Utc>,
}

impl SellerProfileResponse {
    pub fn from_identity(identity: &Identity) -> Self {
        let profile = identity.seller.as_ref();
        Self {
            id: identity.id,
            email: identity.email.clone(),
            username: identity.username.clone(),
            store_name: profile.map(|p| p.store_name.clone()).unwrap_or_default(),
            bio: profile.map(|p| p.bio.clone()).unwrap_or_default(),
            address: profile.map(|p| p.address.clone()).unwrap_or_default(),
            tax_id: profile.and_then(|p| p.tax_id.clone()),
            is_seller_approved: identity.is_seller_approved(),
            seller_verified: profile.map(|p| p.verified).unwrap_or(false),
            total_sales: identity.stats.total_sales,
            total_products: identity.stats.total_products,
            seller_rating: identity.stats.seller_rating,
            created_at: identity.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub decision: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationListQuery {
    pub status: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Products
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub seller_id: UserId,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub category: Option<String>,
    pub price: u64,
    pub compare_at_price: Option<u64>,
    pub status: String,
    pub is_active: bool,
    /// Blob reference for the main asset; owner views only.
    pub file_url: Option<String>,
    pub file_size: u64,
    pub file_type: String,
    pub file_extension: Option<&'static str>,
    pub thumbnail_url: Option<String>,
    pub stock_quantity: i64,
    pub sold_count: u64,
    pub average_rating: f64,
    pub review_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl ProductResponse {
    /// Owner view: includes the asset reference.
    pub fn owner_view(product: &Product, reviews: &[Review]) -> Self {
        Self::build(product, reviews, true)
    }

    /// Public detail view: file metadata without the internal reference.
    pub fn public_view(product: &Product, reviews: &[Review]) -> Self {
        Self::build(product, reviews, false)
    }

    fn build(product: &Product, reviews: &[Review], include_asset_reference: bool) -> Self {
        Self {
            id: product.id,
            seller_id: product.seller_id,
            title: product.title.clone(),
            description: product.description.clone(),
            short_description: product.short_description.clone(),
            category: product.category.clone(),
            price: product.price,
            compare_at_price: product.compare_at_price,
            status: product.status.as_str().to_string(),
            is_active: product.is_active,
            file_url: include_asset_reference.then(|| product.asset.reference.clone()),
            file_size: product.asset.size,
            file_type: product.asset.content_type.clone(),
            file_extension: canonical_extension(&product.asset.content_type),
            thumbnail_url: product.thumbnail.clone(),
            stock_quantity: product.stock_quantity,
            sold_count: product.sold_count,
            average_rating: average_rating(reviews),
            review_count: review_count(reviews),
            created_at: product.created_at,
            updated_at: product.updated_at,
            published_at: product.published_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Multipart product forms
// ─────────────────────────────────────────────────────────────────────────────

/// A parsed `multipart/form-data` product submission: scalar fields plus the
/// optional `file` and `thumbnail` parts.
#[derive(Debug, Default)]
pub struct ProductForm {
    fields: HashMap<String, String>,
    pub file: Option<AssetUpload>,
    pub thumbnail: Option<AssetUpload>,
}

impl ProductForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, Response> {
        let mut form = Self::default();

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(error) => {
                    return Err(json_error(
                        StatusCode::BAD_REQUEST,
                        "invalid_multipart",
                        error.to_string(),
                    ));
                }
            };

            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "file" || name == "thumbnail" {
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let filename = field.file_name().map(str::to_string);
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(error) => {
                        return Err(json_error(
                            StatusCode::BAD_REQUEST,
                            "invalid_multipart",
                            error.to_string(),
                        ));
                    }
                };
                let upload = AssetUpload {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                };
                if name == "file" {
                    form.file = Some(upload);
                } else {
                    form.thumbnail = Some(upload);
                }
            } else {
                let text = match field.text().await {
                    Ok(text) => text,
                    Err(error) => {
                        return Err(json_error(
                            StatusCode::BAD_REQUEST,
                            "invalid_multipart",
                            error.to_string(),
                        ));
                    }
                };
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Interpret the scalar fields as a full create payload.
    pub fn new_product(&self) -> Result<NewProduct, Response> {
        Ok(NewProduct {
            title: self.required("title")?,
            description: self.required("description")?,
            short_description: self.fields.get("short_description").cloned(),
            price: self
                .parsed::<u64>("price")?
                .ok_or_else(|| missing_field("price"))?,
            compare_at_price: self.parsed("compare_at_price")?,
            category: self.fields.get("category").cloned(),
            stock_quantity: self.parsed::<i64>("stock_quantity")?.unwrap_or(-1),
            status: self.parsed::<ProductStatus>("status")?,
        })
    }

    /// Interpret the scalar fields as a partial update.
    pub fn patch(&self) -> Result<ProductPatch, Response> {
        Ok(ProductPatch {
            title: self.fields.get("title").cloned(),
            description: self.fields.get("description").cloned(),
            short_description: self.fields.get("short_description").cloned(),
            price: self.parsed("price")?,
            compare_at_price: self.parsed("compare_at_price")?,
            category: self.fields.get("category").cloned(),
            stock_quantity: self.parsed("stock_quantity")?,
            is_active: self.parsed("is_active")?,
            status: self.parsed("status")?,
        })
    }

    fn required(&self, name: &'static str) -> Result<String, Response> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| missing_field(name))
    }

    fn parsed<T>(&self, name: &'static str) -> Result<Option<T>, Response>
    where
        T: core::str::FromStr,
        T::Err: core::fmt::Display,
    {
        match self.fields.get(name) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|error| {
                json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    format!("invalid value for '{name}': {error}"),
                )
            }),
        }
    }
}

fn missing_field(name: &'static str) -> Response {
    json_error(
        StatusCode::BAD_REQUEST,
        "validation_error",
        format!("missing required field '{name}'"),
    )
}
