use thiserror::Error;

use vendora_auth::AccessError;

/// Product lifecycle error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("seller account not approved")]
    SellerNotApproved,

    #[error("admin access required")]
    AdminRequired,

    #[error("access denied: you can only manage your own products")]
    NotOwner,

    #[error("product not found")]
    NotFound,

    #[error("file too large: {size} bytes exceeds the {max} byte limit")]
    AssetTooLarge { size: u64, max: u64 },

    #[error("file type '{0}' is not allowed")]
    AssetTypeNotAllowed(String),

    #[error("thumbnail type '{0}' is not allowed (jpeg or png only)")]
    ThumbnailTypeNotAllowed(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid status transition: {0}")]
    InvalidTransition(String),
}

impl ProductError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<AccessError> for ProductError {
    fn from(value: AccessError) -> Self {
        match value {
            // Both "not a seller" and "seller awaiting approval" deny product
            // management the same way at this boundary.
            AccessError::SellerRequired | AccessError::SellerNotApproved => {
                ProductError::SellerNotApproved
            }
            AccessError::AdminRequired => ProductError::AdminRequired,
            AccessError::NotOwner => ProductError::NotOwner,
        }
    }
}
