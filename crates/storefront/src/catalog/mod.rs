//! Catalog logic that does not touch the database directly: filter
//! normalization, predicate rendering, row folding, recommendation
//! selection and review summaries.

pub mod assemble;
pub mod filters;
pub mod predicate;
pub mod recommend;
pub mod reviews;

pub use filters::ProductFilters;
pub use predicate::{Conditions, LookupColumn, Predicate, VariantDimension};
