//! Product detail and recommendation queries.

use sqlx::PgPool;
use tracing::instrument;

use stride_core::ProductId;

use super::RepositoryError;
use crate::catalog::assemble::{ProductRow, fold_product_rows};
use crate::catalog::recommend::{
    CandidateRow, SourceProduct, candidate_query, select_recommendations,
};
use crate::models::{FullProduct, RecommendedProduct};

/// Repository for single-product queries.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product with its lookups, variants and images.
    ///
    /// Publication status is not checked; the result carries
    /// `is_published` for the caller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a joined row is incomplete.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Option<FullProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT p.id AS product_id,
                   p.name AS product_name,
                   p.description AS product_description,
                   p.is_published,
                   p.default_variant_id,
                   p.created_at AS product_created_at,
                   p.updated_at AS product_updated_at,
                   b.id AS brand_id, b.name AS brand_name, b.slug AS brand_slug,
                   b.logo_url AS brand_logo_url,
                   c.id AS category_id, c.name AS category_name, c.slug AS category_slug,
                   c.parent_id AS category_parent_id,
                   g.id AS gender_id, g.label AS gender_label, g.slug AS gender_slug,
                   pv.id AS variant_id, pv.sku AS variant_sku, pv.price AS variant_price,
                   pv.sale_price AS variant_sale_price, pv.color_id AS variant_color_id,
                   pv.size_id AS variant_size_id, pv.in_stock AS variant_in_stock,
                   co.id AS color_id, co.name AS color_name, co.slug AS color_slug,
                   co.hex_code AS color_hex_code,
                   sz.id AS size_id, sz.name AS size_name, sz.slug AS size_slug,
                   sz.sort_order AS size_sort_order,
                   img.id AS image_id, img.url AS image_url, img.variant_id AS image_variant_id,
                   img.sort_order AS image_sort_order, img.is_primary AS image_is_primary
            FROM storefront.product p
            LEFT JOIN storefront.brand b ON b.id = p.brand_id
            LEFT JOIN storefront.category c ON c.id = p.category_id
            LEFT JOIN storefront.gender g ON g.id = p.gender_id
            LEFT JOIN storefront.product_variant pv ON pv.product_id = p.id
            LEFT JOIN storefront.color co ON co.id = pv.color_id
            LEFT JOIN storefront.size sz ON sz.id = pv.size_id
            LEFT JOIN storefront.product_image img ON img.product_id = p.id
            WHERE p.id = $1
            ORDER BY sz.sort_order ASC NULLS LAST, pv.sku ASC NULLS LAST,
                     img.is_primary DESC NULLS LAST, img.sort_order ASC NULLS LAST, img.id ASC
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        fold_product_rows(&rows)
    }

    /// Get the product's category, brand and gender, for scoring
    /// recommendations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn source_product(
        &self,
        id: ProductId,
    ) -> Result<Option<SourceProduct>, RepositoryError> {
        let source = sqlx::query_as::<_, SourceProduct>(
            r"
            SELECT id, category_id, brand_id, gender_id
            FROM storefront.product
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(source)
    }

    /// Recommend related published products.
    ///
    /// Returns an empty list when `id` matches no product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn recommended_products(
        &self,
        id: ProductId,
    ) -> Result<Vec<RecommendedProduct>, RepositoryError> {
        let Some(source) = self.source_product(id).await? else {
            return Ok(Vec::new());
        };

        let mut qb = candidate_query(&source);
        let rows = qb
            .build_query_as::<CandidateRow>()
            .fetch_all(self.pool)
            .await?;

        let picked = select_recommendations(rows);
        tracing::debug!(count = picked.len(), "Selected recommendations");
        Ok(picked)
    }
}
