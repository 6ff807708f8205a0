//! Review summaries.

use chrono::{DateTime, Utc};

use stride_core::{Rating, ReviewId};

use crate::db::RepositoryError;
use crate::models::{Review, ReviewSummary};

/// Number of reviews shown (and averaged) per product.
pub const RECENT_REVIEW_LIMIT: i64 = 10;

/// One review joined with its author.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: ReviewId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = Rating::try_from(row.rating).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid rating on review {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            author: author_display_name(row.author_name.as_deref(), row.author_email.as_deref()),
            rating,
            content: row.comment.unwrap_or_default(),
            created_at: row.created_at,
        })
    }
}

/// The name shown for a reviewer: their trimmed name, else their email,
/// else `Anonymous`.
#[must_use]
pub fn author_display_name(name: Option<&str>, email: Option<&str>) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .or_else(|| email.map(str::trim).filter(|e| !e.is_empty()))
        .unwrap_or("Anonymous")
        .to_string()
}

/// Summarize the most recent reviews, newest first.
///
/// The average covers only the given rows.
///
/// # Errors
///
/// Returns `RepositoryError::DataCorruption` if a rating is outside `1..=5`.
pub fn summarize(rows: Vec<ReviewRow>) -> Result<ReviewSummary, RepositoryError> {
    let reviews = rows
        .into_iter()
        .map(Review::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let recent_average = average_rating(&reviews);
    Ok(ReviewSummary {
        recent_count: reviews.len(),
        recent_average,
        reviews,
    })
}

fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating.stars())).sum();
    let count = u32::try_from(reviews.len()).ok()?;
    Some(f64::from(total) / f64::from(count))
}
