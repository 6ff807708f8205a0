//! Lookup dimension queries for the filter panel.

use sqlx::PgPool;
use tracing::instrument;

use super::RepositoryError;
use crate::models::{Brand, Category, Color, FilterOptions, Gender, Size};

/// Repository for lookup dimensions.
pub struct LookupRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LookupRepository<'a> {
    /// Create a new lookup repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every gender, color, size, brand and category, in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    #[instrument(skip(self))]
    pub async fn filter_options(&self) -> Result<FilterOptions, RepositoryError> {
        let (genders, colors, sizes, brands, categories) = tokio::try_join!(
            sqlx::query_as::<_, Gender>(
                "SELECT id, label, slug FROM storefront.gender ORDER BY label",
            )
            .fetch_all(self.pool),
            sqlx::query_as::<_, Color>(
                "SELECT id, name, slug, hex_code FROM storefront.color ORDER BY name",
            )
            .fetch_all(self.pool),
            sqlx::query_as::<_, Size>(
                "SELECT id, name, slug, sort_order FROM storefront.size ORDER BY sort_order, name",
            )
            .fetch_all(self.pool),
            sqlx::query_as::<_, Brand>(
                "SELECT id, name, slug, logo_url FROM storefront.brand ORDER BY name",
            )
            .fetch_all(self.pool),
            sqlx::query_as::<_, Category>(
                "SELECT id, name, slug, parent_id FROM storefront.category ORDER BY name",
            )
            .fetch_all(self.pool),
        )?;

        Ok(FilterOptions {
            genders,
            colors,
            sizes,
            brands,
            categories,
        })
    }
}
