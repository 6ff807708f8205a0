//! Review queries.

use sqlx::PgPool;
use tracing::instrument;

use stride_core::ProductId;

use super::RepositoryError;
use crate::catalog::reviews::{RECENT_REVIEW_LIMIT, ReviewRow, summarize};
use crate::models::ReviewSummary;

/// Repository for product reviews.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the most recent reviews for a product and their average rating.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored rating is invalid.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn recent_reviews(
        &self,
        product_id: ProductId,
    ) -> Result<ReviewSummary, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r"
            SELECT r.id, r.rating, r.comment, r.created_at,
                   u.name AS author_name, u.email AS author_email
            FROM storefront.review r
            LEFT JOIN storefront.user u ON u.id = r.user_id
            WHERE r.product_id = $1
            ORDER BY r.created_at DESC, r.id ASC
            LIMIT $2
            ",
        )
        .bind(product_id)
        .bind(RECENT_REVIEW_LIMIT)
        .fetch_all(self.pool)
        .await?;

        summarize(rows)
    }
}
