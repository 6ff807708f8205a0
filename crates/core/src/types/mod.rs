//! Core types for the Stride catalog.
//!
//! This module provides type-safe wrappers for common catalog concepts.

pub mod id;
pub mod page;
pub mod price;
pub mod rating;
pub mod slug;
pub mod sort;

pub use id::*;
pub use page::PageRequest;
pub use price::{PriceBucket, parse_price};
pub use rating::{Rating, RatingError};
pub use slug::{Slug, SlugError};
pub use sort::SortKey;
