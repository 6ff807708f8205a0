//! Listing filter normalization.
//!
//! Turns a raw listing query string into [`ProductFilters`]. Parsing never
//! fails: malformed values are dropped and the listing degrades to "no
//! filter" for that dimension.

use std::borrow::Cow;

use rust_decimal::Decimal;

use stride_core::{PageRequest, PriceBucket, Slug, SortKey, parse_price};

/// Normalized listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    /// Free-text search, trimmed and non-empty.
    pub search: Option<String>,
    pub genders: Vec<Slug>,
    pub sizes: Vec<Slug>,
    pub colors: Vec<Slug>,
    pub brands: Vec<Slug>,
    pub categories: Vec<Slug>,
    /// Inclusive lower price bound.
    pub price_min: Option<Decimal>,
    /// Inclusive upper price bound.
    pub price_max: Option<Decimal>,
    /// Half-open price ranges; a variant matches if it falls in any of them.
    pub price_buckets: Vec<PriceBucket>,
    pub sort: SortKey,
    pub page: PageRequest,
}

impl ProductFilters {
    /// Parse filters from a raw (still percent-encoded) query string.
    ///
    /// ```
    /// use stride_storefront::catalog::ProductFilters;
    ///
    /// let filters = ProductFilters::from_query("gender[]=men&color=Red&sort=price_asc");
    /// assert_eq!(filters.genders[0].as_str(), "men");
    /// assert_eq!(filters.colors[0].as_str(), "red");
    /// ```
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// Parse filters from already-decoded key/value pairs, in query order.
    #[must_use]
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    {
        let params = Params(pairs.into_iter().collect());

        // Postgres text cannot hold NUL.
        let search = params
            .first("search")
            .map(|s| s.replace('\0', ""))
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        Self {
            search,
            genders: params.slugs("gender"),
            sizes: params.slugs("size"),
            colors: params.slugs("color"),
            brands: params.slugs("brand"),
            categories: params.slugs("category"),
            price_min: params.first("priceMin").and_then(parse_price),
            price_max: params.first("priceMax").and_then(parse_price),
            price_buckets: params.price_buckets(),
            sort: params.first("sort").map(SortKey::parse).unwrap_or_default(),
            page: PageRequest::from_params(params.first("page"), params.first("limit")),
        }
    }

    /// Whether any filter narrows which variants count for a product.
    #[must_use]
    pub fn has_variant_filters(&self) -> bool {
        !self.sizes.is_empty() || !self.colors.is_empty() || self.has_price_filter()
    }

    /// Whether any price bound or bucket is active.
    #[must_use]
    pub fn has_price_filter(&self) -> bool {
        self.price_min.is_some() || self.price_max.is_some() || !self.price_buckets.is_empty()
    }

    /// Labels for the active filters, in display order.
    #[must_use]
    pub fn badges(&self) -> Vec<String> {
        let mut badges = Vec::new();
        badges.extend(self.genders.iter().map(Slug::capitalized));
        badges.extend(self.sizes.iter().map(|s| format!("Size: {s}")));
        badges.extend(self.colors.iter().map(Slug::capitalized));
        badges.extend(self.price_buckets.iter().map(PriceBucket::label));
        badges.extend(self.brands.iter().map(Slug::capitalized));
        badges.extend(self.categories.iter().map(Slug::capitalized));
        badges
    }
}

/// Decoded query pairs with `key` / `key[]` lookups.
struct Params<'a>(Vec<(Cow<'a, str>, Cow<'a, str>)>);

impl Params<'_> {
    /// First value of `key`, else the first value of `key[]`.
    fn first(&self, key: &str) -> Option<&str> {
        let bracketed = format!("{key}[]");
        self.find(key).or_else(|| self.find(&bracketed))
    }

    fn find(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| &**v)
    }

    /// Every value of `key` and `key[]`, in order of appearance.
    fn all(&self, key: &str) -> impl Iterator<Item = &str> {
        let bracketed = format!("{key}[]");
        self.0
            .iter()
            .filter(move |(k, _)| *k == key || *k == bracketed)
            .map(|(_, v)| &**v)
    }

    /// Valid, lower-cased, de-duplicated slugs for `key`.
    fn slugs(&self, key: &str) -> Vec<Slug> {
        let mut slugs: Vec<Slug> = Vec::new();
        for slug in self.all(key).filter_map(|v| Slug::parse(v).ok()) {
            if !slugs.contains(&slug) {
                slugs.push(slug);
            }
        }
        slugs
    }

    fn price_buckets(&self) -> Vec<PriceBucket> {
        let mut buckets: Vec<PriceBucket> = Vec::new();
        for bucket in self.all("price").filter_map(PriceBucket::parse) {
            if !buckets.contains(&bucket) {
                buckets.push(bucket);
            }
        }
        buckets
    }
}
