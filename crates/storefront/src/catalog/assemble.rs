//! Folding the product detail join into a [`FullProduct`].
//!
//! The detail query joins a product with its lookups, every variant (with
//! color and size) and every image in one statement, so each variant and
//! image id shows up once per row it is multiplied with. Folding keeps the
//! first occurrence of each id and preserves first-seen order.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use stride_core::{
    BrandId, CategoryId, ColorId, GenderId, ImageId, ProductId, SizeId, Slug, VariantId,
};

use crate::db::RepositoryError;
use crate::models::{
    Brand, Category, Color, FullProduct, Gender, Product, ProductImage, Size, Variant,
};

/// One row of the product detail join.
///
/// Every column after the product's own is nullable because the joins are
/// `LEFT JOIN`s.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_description: Option<String>,
    pub is_published: bool,
    pub default_variant_id: Option<VariantId>,
    pub product_created_at: DateTime<Utc>,
    pub product_updated_at: DateTime<Utc>,

    pub brand_id: Option<BrandId>,
    pub brand_name: Option<String>,
    pub brand_slug: Option<Slug>,
    pub brand_logo_url: Option<String>,

    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
    pub category_slug: Option<Slug>,
    pub category_parent_id: Option<CategoryId>,

    pub gender_id: Option<GenderId>,
    pub gender_label: Option<String>,
    pub gender_slug: Option<Slug>,

    pub variant_id: Option<VariantId>,
    pub variant_sku: Option<String>,
    pub variant_price: Option<Decimal>,
    pub variant_sale_price: Option<Decimal>,
    pub variant_color_id: Option<ColorId>,
    pub variant_size_id: Option<SizeId>,
    pub variant_in_stock: Option<i32>,

    pub color_id: Option<ColorId>,
    pub color_name: Option<String>,
    pub color_slug: Option<Slug>,
    pub color_hex_code: Option<String>,

    pub size_id: Option<SizeId>,
    pub size_name: Option<String>,
    pub size_slug: Option<Slug>,
    pub size_sort_order: Option<i32>,

    pub image_id: Option<ImageId>,
    pub image_url: Option<String>,
    pub image_variant_id: Option<VariantId>,
    pub image_sort_order: Option<i32>,
    pub image_is_primary: Option<bool>,
}

impl ProductRow {
    fn product(&self) -> Product {
        Product {
            id: self.product_id,
            name: self.product_name.clone(),
            description: self.product_description.clone(),
            is_published: self.is_published,
            default_variant_id: self.default_variant_id,
            created_at: self.product_created_at,
            updated_at: self.product_updated_at,
            brand: self.brand(),
            category: self.category(),
            gender: self.gender(),
        }
    }

    fn brand(&self) -> Option<Brand> {
        Some(Brand {
            id: self.brand_id?,
            name: self.brand_name.clone()?,
            slug: self.brand_slug.clone()?,
            logo_url: self.brand_logo_url.clone(),
        })
    }

    fn category(&self) -> Option<Category> {
        Some(Category {
            id: self.category_id?,
            name: self.category_name.clone()?,
            slug: self.category_slug.clone()?,
            parent_id: self.category_parent_id,
        })
    }

    fn gender(&self) -> Option<Gender> {
        Some(Gender {
            id: self.gender_id?,
            label: self.gender_label.clone()?,
            slug: self.gender_slug.clone()?,
        })
    }

    fn color(&self) -> Option<Color> {
        Some(Color {
            id: self.color_id?,
            name: self.color_name.clone()?,
            slug: self.color_slug.clone()?,
            hex_code: self.color_hex_code.clone()?,
        })
    }

    fn size(&self) -> Option<Size> {
        Some(Size {
            id: self.size_id?,
            name: self.size_name.clone()?,
            slug: self.size_slug.clone()?,
            sort_order: self.size_sort_order?,
        })
    }

    /// The variant on this row, if the row has one.
    fn variant(&self) -> Result<Option<Variant>, RepositoryError> {
        let Some(id) = self.variant_id else {
            return Ok(None);
        };
        let incomplete =
            || RepositoryError::DataCorruption(format!("variant {id} is missing required columns"));

        Ok(Some(Variant {
            id,
            product_id: self.product_id,
            sku: self.variant_sku.clone().ok_or_else(incomplete)?,
            price: self.variant_price.ok_or_else(incomplete)?,
            sale_price: self.variant_sale_price,
            color_id: self.variant_color_id.ok_or_else(incomplete)?,
            size_id: self.variant_size_id.ok_or_else(incomplete)?,
            color: self.color(),
            size: self.size(),
            in_stock: self.variant_in_stock.unwrap_or(0),
        }))
    }

    /// The image on this row, if the row has one.
    fn image(&self) -> Result<Option<ProductImage>, RepositoryError> {
        let Some(id) = self.image_id else {
            return Ok(None);
        };
        let url = self.image_url.clone().ok_or_else(|| {
            RepositoryError::DataCorruption(format!("image {id} has no url"))
        })?;

        Ok(Some(ProductImage {
            id,
            product_id: self.product_id,
            variant_id: self.image_variant_id,
            url,
            sort_order: self.image_sort_order.unwrap_or(0),
            is_primary: self.image_is_primary.unwrap_or(false),
        }))
    }
}

/// Fold detail join rows into one product with de-duplicated variants and
/// images.
///
/// Returns `Ok(None)` when there are no rows.
///
/// # Errors
///
/// Returns `RepositoryError::DataCorruption` if a joined variant or image is
/// missing a required column.
pub fn fold_product_rows(rows: &[ProductRow]) -> Result<Option<FullProduct>, RepositoryError> {
    let Some(first) = rows.first() else {
        return Ok(None);
    };

    let mut variants = Vec::new();
    let mut images = Vec::new();
    let mut seen_variants = HashSet::new();
    let mut seen_images = HashSet::new();

    for row in rows {
        if let Some(variant) = row.variant()?
            && seen_variants.insert(variant.id)
        {
            variants.push(variant);
        }
        if let Some(image) = row.image()?
            && seen_images.insert(image.id)
        {
            images.push(image);
        }
    }

    Ok(Some(FullProduct {
        product: first.product(),
        variants,
        images,
    }))
}
