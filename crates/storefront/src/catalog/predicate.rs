//! Listing predicates rendered into SQL.
//!
//! A listing `WHERE` clause is a list of [`Predicate`]s collected in
//! [`Conditions`] and joined with `AND`. Every user-supplied value is bound
//! with `push_bind`; column and table names only ever come from the
//! `'static` mappings on [`LookupColumn`] and [`VariantDimension`].
//!
//! Rendered SQL assumes these aliases:
//!
//! | alias | table |
//! |-------|-------|
//! | `p`   | `storefront.product` |
//! | `pv`  | `storefront.product_variant` |
//! | `g`   | `storefront.gender` |
//! | `b`   | `storefront.brand` |
//! | `c`   | `storefront.category` |

use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};

use stride_core::{PriceBucket, Slug};

/// A product-level lookup dimension matched by slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupColumn {
    Gender,
    Brand,
    Category,
}

impl LookupColumn {
    const fn column(self) -> &'static str {
        match self {
            Self::Gender => "g.slug",
            Self::Brand => "b.slug",
            Self::Category => "c.slug",
        }
    }
}

/// A variant-level dimension matched by slug through its lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantDimension {
    Size,
    Color,
}

impl VariantDimension {
    const fn column(self) -> &'static str {
        match self {
            Self::Size => "pv.size_id",
            Self::Color => "pv.color_id",
        }
    }

    const fn lookup_table(self) -> &'static str {
        match self {
            Self::Size => "storefront.size",
            Self::Color => "storefront.color",
        }
    }
}

/// A single listing condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `p.is_published = TRUE`
    Published,
    /// Case-insensitive substring match on name or description. Holds the
    /// already-escaped `ILIKE` pattern.
    TextSearch(String),
    /// Lookup slug is one of the given values.
    SlugIn {
        column: LookupColumn,
        slugs: Vec<String>,
    },
    /// Variant's size/color id is one whose slug is one of the given values.
    VariantDimensionIn {
        dimension: VariantDimension,
        slugs: Vec<String>,
    },
    /// `pv.price >= $n`
    PriceAtLeast(Decimal),
    /// `pv.price <= $n`
    PriceAtMost(Decimal),
    /// `pv.price < $n`
    PriceBelow(Decimal),
    /// Every child holds. Empty is `TRUE`.
    AllOf(Vec<Self>),
    /// At least one child holds. Empty is `FALSE`.
    AnyOf(Vec<Self>),
}

impl Predicate {
    /// Substring search for `term`, with `%`, `_` and `\` matched literally.
    #[must_use]
    pub fn text_search(term: &str) -> Self {
        Self::TextSearch(format!("%{}%", escape_like(term)))
    }

    #[must_use]
    pub fn slug_in(column: LookupColumn, slugs: &[Slug]) -> Self {
        Self::SlugIn {
            column,
            slugs: slugs.iter().map(|s| s.as_str().to_owned()).collect(),
        }
    }

    #[must_use]
    pub fn variant_dimension_in(dimension: VariantDimension, slugs: &[Slug]) -> Self {
        Self::VariantDimensionIn {
            dimension,
            slugs: slugs.iter().map(|s| s.as_str().to_owned()).collect(),
        }
    }

    /// A half-open `[min, max)` price range; missing sides are omitted.
    #[must_use]
    pub fn price_bucket(bucket: &PriceBucket) -> Self {
        let mut parts = Vec::with_capacity(2);
        if let Some(min) = bucket.min {
            parts.push(Self::PriceAtLeast(min));
        }
        if let Some(max) = bucket.max {
            parts.push(Self::PriceBelow(max));
        }
        Self::AllOf(parts)
    }

    /// Append this predicate's SQL to `qb`.
    pub fn render(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::Published => {
                qb.push("p.is_published = TRUE");
            }
            Self::TextSearch(pattern) => {
                qb.push("(p.name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR p.description ILIKE ")
                    .push_bind(pattern.clone())
                    .push(")");
            }
            Self::SlugIn { column, slugs } => {
                qb.push(column.column())
                    .push(" = ANY(")
                    .push_bind(slugs.clone())
                    .push(")");
            }
            Self::VariantDimensionIn { dimension, slugs } => {
                qb.push(dimension.column())
                    .push(" IN (SELECT id FROM ")
                    .push(dimension.lookup_table())
                    .push(" WHERE slug = ANY(")
                    .push_bind(slugs.clone())
                    .push("))");
            }
            Self::PriceAtLeast(min) => {
                qb.push("pv.price >= ").push_bind(*min);
            }
            Self::PriceAtMost(max) => {
                qb.push("pv.price <= ").push_bind(*max);
            }
            Self::PriceBelow(max) => {
                qb.push("pv.price < ").push_bind(*max);
            }
            Self::AllOf(children) => render_group(qb, children, " AND ", "TRUE"),
            Self::AnyOf(children) => render_group(qb, children, " OR ", "FALSE"),
        }
    }
}

fn render_group(
    qb: &mut QueryBuilder<'_, Postgres>,
    children: &[Predicate],
    separator: &str,
    empty: &str,
) {
    match children {
        [] => {
            qb.push(empty);
        }
        [only] => only.render(qb),
        _ => {
            qb.push("(");
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    qb.push(separator);
                }
                child.render(qb);
            }
            qb.push(")");
        }
    }
}

/// Escape `ILIKE` wildcards so user text matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Conditions joined with `AND`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    predicates: Vec<Predicate>,
}

impl Conditions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition.
    pub fn push(&mut self, predicate: Predicate) -> &mut Self {
        self.predicates.push(predicate);
        self
    }

    /// Append ` WHERE a AND b ...`, or nothing when there are no conditions.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.render(qb);
        }
    }
}
