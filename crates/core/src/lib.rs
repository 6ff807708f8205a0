//! Stride Core - Shared catalog types.
//!
//! This crate provides the domain vocabulary used by the Stride components:
//! - `storefront` - Catalog query service (listing, detail, recommendations, reviews)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no database
//! access, no HTTP. Database encode/decode impls are gated behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Typed UUID ids, slugs, sort keys, price buckets, pagination and ratings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
