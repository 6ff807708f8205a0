//! Catalog listing sort order.

use serde::{Deserialize, Serialize};

/// Sort order for the product listing.
///
/// Every order is followed by a `created_at DESC, id ASC` tiebreak so pages
/// are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Merchandised order. Currently the same as [`SortKey::Newest`].
    Featured,
    /// Most recently created first.
    #[default]
    Newest,
    /// Lowest minimum variant price first.
    PriceAsc,
    /// Highest maximum variant price first.
    PriceDesc,
}

impl SortKey {
    /// Parse from a URL parameter value.
    ///
    /// Unknown values fall back to [`SortKey::Newest`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "featured" => Self::Featured,
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            _ => Self::Newest,
        }
    }

    /// Convert to the URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
