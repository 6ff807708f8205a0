//! Database operations for the storefront catalog.
//!
//! # Schema: `storefront`
//!
//! ## Tables
//!
//! - `product` - Catalog entries with optional brand, category and gender
//! - `product_variant` - One color in one size, with price and stock
//! - `product_image` - Images, optionally tied to a variant
//! - `gender`, `color`, `size`, `brand`, `category` - Lookup dimensions
//! - `user`, `review` - Product reviews and their authors
//!
//! The catalog only reads. Queries are built at runtime with
//! `sqlx::QueryBuilder` or `sqlx::query_as` and every value is bound.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p stride-cli -- migrate
//! ```

pub mod catalog;
pub mod lookups;
pub mod products;
pub mod reviews;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::CatalogRepository;
pub use lookups::LookupRepository;
pub use products::ProductRepository;
pub use reviews::ReviewRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(2.min(max_connections))
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
