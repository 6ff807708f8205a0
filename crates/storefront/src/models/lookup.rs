//! Lookup dimensions: genders, colors, sizes, brands and categories.

use serde::Serialize;

use stride_core::{BrandId, CategoryId, ColorId, GenderId, SizeId, Slug};

/// A gender dimension (e.g. `men`, `women`, `unisex`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Gender {
    pub id: GenderId,
    pub label: String,
    pub slug: Slug,
}

/// A color with its display hex code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
    pub slug: Slug,
    /// `#RRGGBB`
    pub hex_code: String,
}

/// A shoe size. `sort_order` gives the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Size {
    pub id: SizeId,
    pub name: String,
    pub slug: Slug,
    pub sort_order: i32,
}

/// A brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub slug: Slug,
    pub logo_url: Option<String>,
}

/// A category, optionally nested under a parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub parent_id: Option<CategoryId>,
}

/// Every value a listing filter may offer, in display order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterOptions {
    pub genders: Vec<Gender>,
    pub colors: Vec<Color>,
    pub sizes: Vec<Size>,
    pub brands: Vec<Brand>,
    pub categories: Vec<Category>,
}
