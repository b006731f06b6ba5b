//! Digital asset uploads and their validation rules.

use serde::{Deserialize, Serialize};

use crate::error::ProductError;

/// Content types accepted for the main product file, with their canonical
/// extensions.
const ASSET_TYPES: &[(&str, &str)] = &[
    ("application/pdf", "pdf"),
    ("application/zip", "zip"),
    ("application/epub+zip", "epub"),
    ("audio/mpeg", "mp3"),
    ("video/mp4", "mp4"),
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
];

/// Thumbnails are restricted to the two image types.
const THUMBNAIL_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Size caps for uploaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    pub max_asset_bytes: u64,
    pub max_thumbnail_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_asset_bytes: 100 * 1024 * 1024,
            max_thumbnail_bytes: 5 * 1024 * 1024,
        }
    }
}

/// An uploaded file, as received from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpload {
    pub filename: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AssetUpload {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A stored asset: the blob reference plus the metadata recorded on the
/// product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Opaque blob-store reference.
    pub reference: String,
    pub size: u64,
    pub content_type: String,
}

/// Canonical extension for an allowed content type, `None` if disallowed.
pub fn canonical_extension(content_type: &str) -> Option<&'static str> {
    ASSET_TYPES
        .iter()
        .find(|(ct, _)| *ct == content_type)
        .map(|(_, ext)| *ext)
}

/// Validate a main product file before anything is stored.
pub fn validate_asset(upload: &AssetUpload, policy: &UploadPolicy) -> Result<(), ProductError> {
    if upload.size() > policy.max_asset_bytes {
        return Err(ProductError::AssetTooLarge {
            size: upload.size(),
            max: policy.max_asset_bytes,
        });
    }
    if canonical_extension(&upload.content_type).is_none() {
        return Err(ProductError::AssetTypeNotAllowed(
            upload.content_type.clone(),
        ));
    }
    Ok(())
}

/// Validate a thumbnail before anything is stored.
pub fn validate_thumbnail(upload: &AssetUpload, policy: &UploadPolicy) -> Result<(), ProductError> {
    if upload.size() > policy.max_thumbnail_bytes {
        return Err(ProductError::AssetTooLarge {
            size: upload.size(),
            max: policy.max_thumbnail_bytes,
        });
    }
    if !THUMBNAIL_TYPES.contains(&upload.content_type.as_str()) {
        return Err(ProductError::ThumbnailTypeNotAllowed(
            upload.content_type.clone(),
        ));
    }
    Ok(())
}
