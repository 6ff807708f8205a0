//! Price filter types using decimal arithmetic.
//!
//! Variant prices are stored as `numeric(10,2)` and handled as
//! [`rust_decimal::Decimal`] end to end, so comparisons against filter bounds
//! never go through floating point.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parse a non-negative price bound from user input.
///
/// Returns `None` for empty, unparseable or negative input, which callers
/// treat as "no bound".
#[must_use]
pub fn parse_price(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .ok()
        .filter(|d| !d.is_sign_negative())
}

/// A discrete price interval offered as a filter option, `[min, max)`.
///
/// Either side may be open: `150-` is "150 and over", `-50` is "under 50".
/// A bucket always has at least one bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceBucket {
    /// Inclusive lower bound.
    pub min: Option<Decimal>,
    /// Exclusive upper bound.
    pub max: Option<Decimal>,
}

impl PriceBucket {
    /// Parse a bucket from its URL form (`"<min>-<max>"`).
    ///
    /// Sides that do not parse are treated as open. Returns `None` when
    /// neither side yields a bound, so the bucket is dropped rather than
    /// matching everything.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use stride_core::PriceBucket;
    ///
    /// let bucket = PriceBucket::parse("50-100").unwrap();
    /// assert_eq!(bucket.min, Some(Decimal::from(50)));
    /// assert_eq!(bucket.max, Some(Decimal::from(100)));
    ///
    /// assert!(PriceBucket::parse("abc-def").is_none());
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (min_str, max_str) = s.split_once('-').unwrap_or((s, ""));
        let bucket = Self {
            min: parse_price(min_str),
            max: parse_price(max_str),
        };
        (bucket.min.is_some() || bucket.max.is_some()).then_some(bucket)
    }

    /// Human-readable label, e.g. `$50 - $100` or `Over $150`.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("${} - ${}", min.normalize(), max.normalize()),
            (Some(min), None) => format!("Over ${}", min.normalize()),
            (None, Some(max)) => format!("$0 - ${}", max.normalize()),
            (None, None) => "Any price".to_owned(),
        }
    }
}
