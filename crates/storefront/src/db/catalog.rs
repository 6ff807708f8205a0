//! Catalog listing repository.
//!
//! Builds the filtered, sorted and paginated listing query plus its count
//! query from [`ProductFilters`], and runs both concurrently.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use stride_core::{ProductId, SortKey};

use super::RepositoryError;
use crate::catalog::{Conditions, LookupColumn, Predicate, ProductFilters, VariantDimension};
use crate::models::{ProductListItem, ProductPage};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for one aggregated listing row.
#[derive(Debug, sqlx::FromRow)]
struct ListingRow {
    id: ProductId,
    name: String,
    created_at: DateTime<Utc>,
    gender_label: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    image_url: Option<String>,
}

impl From<ListingRow> for ProductListItem {
    fn from(row: ListingRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            min_price: row.min_price,
            max_price: row.max_price,
            created_at: row.created_at,
            subtitle: row.gender_label.map(|label| format!("{label} Shoes")),
        }
    }
}

// =============================================================================
// Query Construction
// =============================================================================

/// The listing's page and count queries for one set of filters.
///
/// Product-level conditions (publication, search, gender/brand/category)
/// go in the outer `WHERE`; variant-level conditions (size, color, price)
/// go inside the variant CTE so they narrow which variants feed the price
/// aggregates.
#[derive(Debug)]
pub struct ListingQuery<'f> {
    filters: &'f ProductFilters,
    product_conditions: Conditions,
    variant_conditions: Conditions,
}

impl<'f> ListingQuery<'f> {
    #[must_use]
    pub fn new(filters: &'f ProductFilters) -> Self {
        let mut product_conditions = Conditions::new();
        product_conditions.push(Predicate::Published);
        if let Some(search) = &filters.search {
            product_conditions.push(Predicate::text_search(search));
        }
        for (column, slugs) in [
            (LookupColumn::Gender, &filters.genders),
            (LookupColumn::Brand, &filters.brands),
            (LookupColumn::Category, &filters.categories),
        ] {
            if !slugs.is_empty() {
                product_conditions.push(Predicate::slug_in(column, slugs));
            }
        }

        let mut variant_conditions = Conditions::new();
        for (dimension, slugs) in [
            (VariantDimension::Size, &filters.sizes),
            (VariantDimension::Color, &filters.colors),
        ] {
            if !slugs.is_empty() {
                variant_conditions.push(Predicate::variant_dimension_in(dimension, slugs));
            }
        }
        if !filters.price_buckets.is_empty() {
            variant_conditions.push(Predicate::AnyOf(
                filters
                    .price_buckets
                    .iter()
                    .map(Predicate::price_bucket)
                    .collect(),
            ));
        }
        if let Some(min) = filters.price_min {
            variant_conditions.push(Predicate::PriceAtLeast(min));
        }
        if let Some(max) = filters.price_max {
            variant_conditions.push(Predicate::PriceAtMost(max));
        }

        Self {
            filters,
            product_conditions,
            variant_conditions,
        }
    }

    /// Whether products must keep at least one variant to be listed.
    fn requires_variant(&self) -> bool {
        self.filters.has_variant_filters()
    }

    fn push_variant_cte(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(
            "v AS (SELECT pv.product_id, pv.price FROM storefront.product_variant pv",
        );
        self.variant_conditions.push_where(qb);
        qb.push(")");
    }

    fn push_image_cte(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(
            "pi AS (SELECT img.product_id, img.url, \
             row_number() OVER (PARTITION BY img.product_id \
             ORDER BY img.is_primary DESC, img.sort_order ASC, img.id ASC) AS rn \
             FROM storefront.product_image img",
        );
        if self.filters.colors.is_empty() {
            qb.push(" WHERE img.variant_id IS NULL");
        } else {
            qb.push(" JOIN storefront.product_variant pv ON pv.id = img.variant_id WHERE ");
            Predicate::variant_dimension_in(VariantDimension::Color, &self.filters.colors)
                .render(qb);
        }
        qb.push(")");
    }

    fn push_joins(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(if self.requires_variant() {
            " JOIN v ON v.product_id = p.id"
        } else {
            " LEFT JOIN v ON v.product_id = p.id"
        });
        qb.push(
            " LEFT JOIN storefront.gender g ON g.id = p.gender_id \
             LEFT JOIN storefront.brand b ON b.id = p.brand_id \
             LEFT JOIN storefront.category c ON c.id = p.category_id",
        );
    }

    /// The page query: one aggregated row per product.
    #[must_use]
    pub fn page_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("WITH ");
        self.push_variant_cte(&mut qb);
        qb.push(", ");
        self.push_image_cte(&mut qb);
        qb.push(
            " SELECT p.id, p.name, p.created_at, g.label AS gender_label, \
             MIN(v.price) AS min_price, MAX(v.price) AS max_price, \
             MAX(pi.url) AS image_url \
             FROM storefront.product p",
        );
        self.push_joins(&mut qb);
        qb.push(" LEFT JOIN pi ON pi.product_id = p.id AND pi.rn = 1");
        self.product_conditions.push_where(&mut qb);
        qb.push(" GROUP BY p.id, p.name, p.created_at, g.label ORDER BY ");
        qb.push(match self.filters.sort {
            SortKey::PriceAsc => "MIN(v.price) ASC NULLS LAST, ",
            SortKey::PriceDesc => "MAX(v.price) DESC NULLS LAST, ",
            SortKey::Featured | SortKey::Newest => "",
        });
        qb.push("p.created_at DESC, p.id ASC LIMIT ");
        qb.push_bind(i64::from(self.filters.page.limit()));
        qb.push(" OFFSET ");
        qb.push_bind(self.filters.page.offset());
        qb
    }

    /// The count query: distinct matching products, no pagination.
    #[must_use]
    pub fn count_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("WITH ");
        self.push_variant_cte(&mut qb);
        qb.push(" SELECT COUNT(DISTINCT p.id) FROM storefront.product p");
        self.push_joins(&mut qb);
        self.product_conditions.push_where(&mut qb);
        qb
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for catalog listing queries.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one page of published products matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    #[instrument(skip(self), fields(page = filters.page.page(), limit = filters.page.limit()))]
    pub async fn list_products(
        &self,
        filters: &ProductFilters,
    ) -> Result<ProductPage, RepositoryError> {
        let query = ListingQuery::new(filters);
        let mut page_qb = query.page_query();
        let mut count_qb = query.count_query();

        let (rows, total_count) = tokio::try_join!(
            page_qb.build_query_as::<ListingRow>().fetch_all(self.pool),
            count_qb.build_query_scalar::<i64>().fetch_one(self.pool),
        )?;

        tracing::debug!(rows = rows.len(), total_count, "Listed products");

        Ok(ProductPage {
            products: rows.into_iter().map(Into::into).collect(),
            total_count,
            page: filters.page.page(),
            limit: filters.page.limit(),
            total_pages: filters.page.total_pages(total_count),
            badges: filters.badges(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_sql(query: &str) -> String {
        let filters = ProductFilters::from_query(query);
        ListingQuery::new(&filters).page_query().sql().to_owned()
    }

    fn count_sql(query: &str) -> String {
        let filters = ProductFilters::from_query(query);
        ListingQuery::new(&filters).count_query().sql().to_owned()
    }

    #[test]
    fn test_unfiltered_listing_uses_left_join() {
        let sql = page_sql("");
        assert!(sql.contains(" LEFT JOIN v ON v.product_id = p.id"));
        assert!(sql.contains("FROM storefront.product_variant pv)"));
        assert!(sql.contains(" WHERE p.is_published = TRUE GROUP BY"));
        assert!(sql.contains("WHERE img.variant_id IS NULL"));
        assert!(sql.ends_with("ORDER BY p.created_at DESC, p.id ASC LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn test_variant_filters_use_inner_join() {
        for query in ["size=9", "color=red", "price=0-50", "priceMin=10", "priceMax=10"] {
            let sql = page_sql(query);
            assert!(sql.contains(" JOIN v ON"), "{query}");
            assert!(!sql.contains("LEFT JOIN v ON"), "{query}");
            assert!(!count_sql(query).contains("LEFT JOIN v ON"), "{query}");
        }
    }

    #[test]
    fn test_dimension_filters_go_in_outer_where() {
        let sql = page_sql("gender=men&brand=nike&category=running-shoes");
        assert!(sql.contains(
            " WHERE p.is_published = TRUE AND g.slug = ANY($1) AND b.slug = ANY($2) AND c.slug = ANY($3)"
        ));
        assert!(sql.contains("LEFT JOIN v ON"));
    }

    #[test]
    fn test_variant_conditions_go_in_cte() {
        let sql = page_sql("size=9&color=red&price=0-150&priceMax=120");
        assert!(sql.starts_with(
            "WITH v AS (SELECT pv.product_id, pv.price FROM storefront.product_variant pv \
             WHERE pv.size_id IN (SELECT id FROM storefront.size WHERE slug = ANY($1)) \
             AND pv.color_id IN (SELECT id FROM storefront.color WHERE slug = ANY($2)) \
             AND (pv.price >= $3 AND pv.price < $4) \
             AND pv.price <= $5)"
        ));
    }

    #[test]
    fn test_color_filter_selects_color_images() {
        let sql = page_sql("color=red");
        assert!(sql.contains(
            "FROM storefront.product_image img JOIN storefront.product_variant pv \
             ON pv.id = img.variant_id WHERE pv.color_id IN \
             (SELECT id FROM storefront.color WHERE slug = ANY($2)))"
        ));
        assert!(!sql.contains("img.variant_id IS NULL"));
    }

    #[test]
    fn test_search_is_bound() {
        let sql = page_sql("search=air%27+OR+1%3D1");
        assert!(sql.contains("(p.name ILIKE $1 OR p.description ILIKE $2)"));
        assert!(!sql.contains("OR 1=1"));
    }

    #[test]
    fn test_sort_orders() {
        assert!(page_sql("sort=price_asc")
            .contains("ORDER BY MIN(v.price) ASC NULLS LAST, p.created_at DESC, p.id ASC"));
        assert!(page_sql("sort=price_desc")
            .contains("ORDER BY MAX(v.price) DESC NULLS LAST, p.created_at DESC, p.id ASC"));
        assert!(page_sql("sort=featured").contains("ORDER BY p.created_at DESC, p.id ASC"));
    }

    #[test]
    fn test_count_query() {
        let sql = count_sql("gender=men");
        assert!(sql.contains("SELECT COUNT(DISTINCT p.id) FROM storefront.product p"));
        assert!(sql.ends_with("WHERE p.is_published = TRUE AND g.slug = ANY($1)"));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("pi AS"));
    }

    #[test]
    fn test_list_item_subtitle() {
        let row = ListingRow {
            id: ProductId::new(uuid::Uuid::new_v4()),
            name: "Nike Air Max 1".to_string(),
            created_at: Utc::now(),
            gender_label: Some("Men".to_string()),
            min_price: None,
            max_price: None,
            image_url: None,
        };
        let item = ProductListItem::from(row);
        assert_eq!(item.subtitle.as_deref(), Some("Men Shoes"));
    }
}
