//! Related-product selection.
//!
//! Candidates are scored by shared dimensions with the source product and
//! ranked in SQL; this module builds that query and picks the final list
//! from the ranked rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};

use stride_core::{BrandId, CategoryId, GenderId, ProductId};

use crate::models::RecommendedProduct;

/// Score for sharing the source product's category.
pub const CATEGORY_WEIGHT: i32 = 3;
/// Score for sharing the source product's brand.
pub const BRAND_WEIGHT: i32 = 2;
/// Score for sharing the source product's gender.
pub const GENDER_WEIGHT: i32 = 1;

/// Ranked candidate rows fetched per request.
pub const CANDIDATE_LIMIT: i64 = 8;
/// Most recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 6;

/// The dimensions of the product recommendations are computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct SourceProduct {
    pub id: ProductId,
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub gender_id: Option<GenderId>,
}

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CandidateRow {
    pub id: ProductId,
    pub name: String,
    pub min_price: Option<Decimal>,
    pub image_url: Option<String>,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

/// Build the ranked candidate query for `source`.
///
/// A null dimension on the source never matches, because `x = NULL` is not
/// true in SQL.
#[must_use]
pub fn candidate_query(source: &SourceProduct) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "WITH v AS (SELECT product_id, MIN(price) AS min_price \
         FROM storefront.product_variant GROUP BY product_id), \
         pi AS (SELECT img.product_id, img.url, \
         row_number() OVER (PARTITION BY img.product_id \
         ORDER BY (img.variant_id IS NULL) DESC, img.is_primary DESC, img.sort_order ASC, img.id ASC) AS rn \
         FROM storefront.product_image img), \
         scored AS (SELECT p.id, p.name, p.created_at, (",
    );
    push_weight(&mut qb, "p.category_id", source.category_id, CATEGORY_WEIGHT);
    qb.push(" + ");
    push_weight(&mut qb, "p.brand_id", source.brand_id, BRAND_WEIGHT);
    qb.push(" + ");
    push_weight(&mut qb, "p.gender_id", source.gender_id, GENDER_WEIGHT);
    qb.push(
        ")::int4 AS score FROM storefront.product p \
         WHERE p.is_published = TRUE AND p.id <> ",
    );
    qb.push_bind(source.id);
    qb.push(
        ") SELECT s.id, s.name, v.min_price, pi.url AS image_url, s.score, s.created_at \
         FROM scored s \
         LEFT JOIN v ON v.product_id = s.id \
         LEFT JOIN pi ON pi.product_id = s.id AND pi.rn = 1 \
         ORDER BY s.score DESC, s.created_at DESC, s.id ASC LIMIT ",
    );
    qb.push_bind(CANDIDATE_LIMIT);
    qb
}

fn push_weight<T>(
    qb: &mut QueryBuilder<'_, Postgres>,
    column: &'static str,
    value: Option<T>,
    weight: i32,
) where
    T: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + 'static,
{
    qb.push("CASE WHEN ")
        .push(column)
        .push(" = ")
        .push_bind(value)
        .push(" THEN ")
        .push(weight)
        .push(" ELSE 0 END");
}

/// Pick recommendations from ranked candidates.
///
/// Walks the rows in rank order, skips candidates without a usable image
/// and stops at [`MAX_RECOMMENDATIONS`].
#[must_use]
pub fn select_recommendations(rows: Vec<CandidateRow>) -> Vec<RecommendedProduct> {
    rows.into_iter()
        .filter_map(|row| {
            let image_url = row.image_url.filter(|url| !url.trim().is_empty())?;
            Some(RecommendedProduct {
                id: row.id,
                title: row.name,
                price: row.min_price,
                image_url,
            })
        })
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn candidate(name: &str, image_url: Option<&str>, score: i32) -> CandidateRow {
        CandidateRow {
            id: ProductId::new(Uuid::new_v4()),
            name: name.to_string(),
            min_price: Some(Decimal::new(8099, 2)),
            image_url: image_url.map(str::to_string),
            score,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_skips_missing_and_blank_images() {
        let rows = vec![
            candidate("a", Some("/a.jpg"), 6),
            candidate("b", None, 5),
            candidate("c", Some("   "), 5),
            candidate("d", Some("/d.jpg"), 3),
        ];

        let titles: Vec<_> = select_recommendations(rows)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["a", "d"]);
    }

    #[test]
    fn test_caps_at_six_in_rank_order() {
        let rows: Vec<_> = (0..8)
            .map(|i| candidate(&format!("p{i}"), Some("/x.jpg"), 8 - i))
            .collect();

        let picked = select_recommendations(rows);
        assert_eq!(picked.len(), MAX_RECOMMENDATIONS);
        assert_eq!(picked[0].title, "p0");
        assert_eq!(picked[5].title, "p5");
    }

    #[test]
    fn test_empty_candidates() {
        assert!(select_recommendations(Vec::new()).is_empty());
    }

    #[test]
    fn test_candidate_query_shape() {
        let source = SourceProduct {
            id: ProductId::new(Uuid::new_v4()),
            category_id: Some(CategoryId::new(Uuid::new_v4())),
            brand_id: None,
            gender_id: Some(GenderId::new(Uuid::new_v4())),
        };

        let qb = candidate_query(&source);
        let sql = qb.sql();
        assert!(sql.contains(
            "(CASE WHEN p.category_id = $1 THEN 3 ELSE 0 END + \
             CASE WHEN p.brand_id = $2 THEN 2 ELSE 0 END + \
             CASE WHEN p.gender_id = $3 THEN 1 ELSE 0 END)::int4 AS score"
        ));
        assert!(sql.contains("WHERE p.is_published = TRUE AND p.id <> $4"));
        assert!(sql.contains("ORDER BY (img.variant_id IS NULL) DESC, img.is_primary DESC"));
        assert!(sql.ends_with("ORDER BY s.score DESC, s.created_at DESC, s.id ASC LIMIT $5"));
    }
}
