//! Offset/limit pagination shared by listing endpoints.

use serde::{Deserialize, Serialize};

/// Pagination parameters for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Offset into the result set (0-based).
    pub offset: usize,
    /// Maximum number of rows to return.
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
        }
    }
}

impl Page {
    pub fn new(offset: Option<usize>, limit: Option<usize>) -> Self {
        let default = Self::default();
        Self {
            offset: offset.unwrap_or(default.offset),
            limit: limit.unwrap_or(default.limit),
        }
    }

    /// Clamp the limit to a caller-configured cap.
    pub fn clamped(self, cap: usize) -> Self {
        Self {
            offset: self.offset,
            limit: self.limit.min(cap),
        }
    }

    /// Apply this page to an in-memory result set.
    pub fn slice<T>(self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.offset).take(self.limit).collect()
    }
}
