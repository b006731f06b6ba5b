//! `vendora-catalog` — the public catalog query engine.
//!
//! Filtering, sorting and projection over product listings. Everything here
//! is pure: the caller fetches the candidate rows and joins, this crate
//! decides what a browsing buyer gets to see and in what order.

pub mod card;
pub mod query;

pub use card::ProductCard;
pub use query::{DEFAULT_LIMIT_CAP, ProductFilters, SortDirection, SortKey};
