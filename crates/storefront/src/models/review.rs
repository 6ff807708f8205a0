//! Product review types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stride_core::{Rating, ReviewId};

/// A review as shown on the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    /// Reviewer's name, falling back to their email, then `Anonymous`.
    pub author: String,
    pub rating: Rating,
    /// Review text; empty when the reviewer left none.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// The most recent reviews for a product and their average rating.
///
/// The average covers only `reviews`, not the product's full history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    /// Newest first.
    pub reviews: Vec<Review>,
    pub recent_count: usize,
    /// `None` when there are no reviews.
    pub recent_average: Option<f64>,
}

impl ReviewSummary {
    /// A summary with no reviews.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            reviews: Vec::new(),
            recent_count: 0,
            recent_average: None,
        }
    }
}
