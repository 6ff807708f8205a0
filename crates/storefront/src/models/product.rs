//! Product catalog types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use stride_core::{ColorId, ImageId, ProductId, SizeId, VariantId};

use super::lookup::{Brand, Category, Color, Gender, Size};

// =============================================================================
// Listing
// =============================================================================

/// One product card in a listing page.
///
/// Price bounds cover only the variants that survived the active filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    pub id: ProductId,
    pub name: String,
    pub image_url: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub min_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub max_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    /// e.g. `Men Shoes`.
    pub subtitle: Option<String>,
}

/// A page of listing results plus the total across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<ProductListItem>,
    pub total_count: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
    /// Labels for the active filters, in display order.
    pub badges: Vec<String>,
}

// =============================================================================
// Detail
// =============================================================================

/// A product with its lookup dimensions resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub is_published: bool,
    pub default_variant_id: Option<VariantId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub brand: Option<Brand>,
    pub category: Option<Category>,
    pub gender: Option<Gender>,
}

/// A purchasable variant (one color in one size).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub sale_price: Option<Decimal>,
    pub color_id: ColorId,
    pub size_id: SizeId,
    pub color: Option<Color>,
    pub size: Option<Size>,
    pub in_stock: i32,
}

/// A product image. `variant_id` is `None` for images shared by all variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: ImageId,
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    pub url: String,
    pub sort_order: i32,
    pub is_primary: bool,
}

/// A product together with all of its variants and images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullProduct {
    pub product: Product,
    pub variants: Vec<Variant>,
    pub images: Vec<ProductImage>,
}

/// The image urls to show while a given variant is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryVariant {
    pub variant_id: VariantId,
    pub images: Vec<String>,
}

impl FullProduct {
    /// Images shared by all variants, primary first then by sort order.
    #[must_use]
    pub fn general_images(&self) -> Vec<&ProductImage> {
        let mut images: Vec<_> = self
            .images
            .iter()
            .filter(|img| img.variant_id.is_none())
            .collect();
        sort_for_display(&mut images);
        images
    }

    /// Per-variant image galleries.
    ///
    /// A variant with no images of its own shows the general images.
    #[must_use]
    pub fn gallery(&self) -> Vec<GalleryVariant> {
        let general: Vec<String> = self
            .general_images()
            .into_iter()
            .map(|img| img.url.clone())
            .collect();

        self.variants
            .iter()
            .map(|variant| {
                let mut own: Vec<_> = self
                    .images
                    .iter()
                    .filter(|img| img.variant_id == Some(variant.id))
                    .collect();
                sort_for_display(&mut own);

                let images = if own.is_empty() {
                    general.clone()
                } else {
                    own.into_iter().map(|img| img.url.clone()).collect()
                };

                GalleryVariant {
                    variant_id: variant.id,
                    images,
                }
            })
            .collect()
    }
}

fn sort_for_display(images: &mut [&ProductImage]) {
    images.sort_by(|a, b| {
        b.is_primary
            .cmp(&a.is_primary)
            .then(a.sort_order.cmp(&b.sort_order))
    });
}

// =============================================================================
// Recommendations
// =============================================================================

/// A related product suggested on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedProduct {
    pub id: ProductId,
    pub title: String,
    /// Lowest variant price; `None` when the product has no variants.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub image_url: String,
}
