//! Seed the catalog with lookup dimensions and demo products.
//!
//! # Usage
//!
//! ```bash
//! stride-cli seed --products 15
//! ```
//!
//! Lookup rows are upserted by slug, so re-running the command is safe.
//! Every run adds a fresh batch of products.

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use stride_core::{BrandId, CategoryId, ColorId, GenderId, ProductId, SizeId, VariantId};

use super::{CommandError, connect};

// =============================================================================
// Lookup Data
// =============================================================================

/// Genders as `(label, slug)`.
const GENDERS: [(&str, &str); 3] = [("Men", "men"), ("Women", "women"), ("Unisex", "unisex")];

/// Colors as `(name, slug, hex code)`.
const COLORS: [(&str, &str, &str); 6] = [
    ("Black", "black", "#000000"),
    ("White", "white", "#FFFFFF"),
    ("Red", "red", "#FF0000"),
    ("Blue", "blue", "#1E3A8A"),
    ("Green", "green", "#10B981"),
    ("Gray", "gray", "#6B7280"),
];

/// Sizes as `(name, slug, sort order)`.
const SIZES: [(&str, &str, i32); 6] = [
    ("7", "7", 0),
    ("8", "8", 1),
    ("9", "9", 2),
    ("10", "10", 3),
    ("11", "11", 4),
    ("12", "12", 5),
];

/// Categories as `(name, slug)`.
const CATEGORIES: [(&str, &str); 3] = [
    ("Shoes", "shoes"),
    ("Running Shoes", "running-shoes"),
    ("Lifestyle", "lifestyle"),
];

const BRAND: (&str, &str) = ("Nike", "nike");

/// Demo image files, cycled through by product index.
const IMAGE_FILES: [&str; 15] = [
    "shoe-1.jpg",
    "shoe-2.webp",
    "shoe-3.webp",
    "shoe-4.webp",
    "shoe-5.avif",
    "shoe-6.avif",
    "shoe-7.avif",
    "shoe-8.avif",
    "shoe-9.avif",
    "shoe-10.avif",
    "shoe-11.avif",
    "shoe-12.avif",
    "shoe-13.avif",
    "shoe-14.avif",
    "shoe-15.avif",
];

// =============================================================================
// Product Plans
// =============================================================================

/// A product to insert, with lookups referenced by index into the tables above.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPlan {
    pub name: String,
    pub description: String,
    pub gender: usize,
    pub category: usize,
    pub variants: Vec<VariantPlan>,
    pub image_file: &'static str,
}

/// One color/size combination of a planned product.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantPlan {
    pub color: usize,
    pub size: usize,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub in_stock: i32,
    pub weight: f32,
}

/// Plan the `index`-th (zero-based) demo product.
///
/// Picks 2-4 distinct colors and 3-6 distinct sizes and creates one variant
/// per combination, colors outermost.
pub fn plan_product<R: Rng + ?Sized>(rng: &mut R, index: usize) -> ProductPlan {
    let name = format!("Nike Air Max {}", index + 1);
    let description = format!("Experience comfort and performance with {name}.");

    let color_indices: Vec<usize> = (0..COLORS.len()).collect();
    let size_indices: Vec<usize> = (0..SIZES.len()).collect();
    let color_count = rng.random_range(2..=4);
    let size_count = rng.random_range(3..=6);
    let colors: Vec<usize> = color_indices
        .choose_multiple(rng, color_count)
        .copied()
        .collect();
    let sizes: Vec<usize> = size_indices
        .choose_multiple(rng, size_count)
        .copied()
        .collect();

    let mut variants = Vec::with_capacity(colors.len() * sizes.len());
    for &color in &colors {
        for &size in &sizes {
            variants.push(plan_variant(rng, color, size));
        }
    }

    ProductPlan {
        name,
        description,
        gender: rng.random_range(0..GENDERS.len()),
        category: rng.random_range(0..CATEGORIES.len()),
        variants,
        image_file: IMAGE_FILES[index % IMAGE_FILES.len()],
    }
}

fn plan_variant<R: Rng + ?Sized>(rng: &mut R, color: usize, size: usize) -> VariantPlan {
    // 80.99 ..= 200.99
    let price = Decimal::new(rng.random_range(80_i64..=200) * 100 + 99, 2);
    let sale_price = rng
        .random_bool(0.3)
        .then(|| price - Decimal::from(rng.random_range(5_i64..=25)));

    VariantPlan {
        color,
        size,
        price,
        sale_price,
        in_stock: rng.random_range(5..=50),
        weight: rng.random_range(0.5_f32..1.5),
    }
}

/// Stock keeping unit for a variant, e.g. `NIKE-1a2b3c4d-BLACK-10`.
#[must_use]
pub fn variant_sku(product_id: ProductId, color_slug: &str, size_slug: &str) -> String {
    let simple = product_id.as_uuid().simple().to_string();
    let prefix = simple.get(..8).unwrap_or(&simple);
    format!(
        "NIKE-{prefix}-{}-{}",
        color_slug.to_uppercase(),
        size_slug.to_uppercase()
    )
}

/// Public URL of a product's seeded image.
#[must_use]
pub fn image_url(product_id: ProductId, file: &str) -> String {
    format!("/static/uploads/shoes/{product_id}-{file}")
}

// =============================================================================
// Database
// =============================================================================

/// Ids of the seeded lookup rows, in the order of the tables above.
struct LookupIds {
    genders: Vec<GenderId>,
    colors: Vec<ColorId>,
    sizes: Vec<SizeId>,
    categories: Vec<CategoryId>,
    brand: BrandId,
}

/// Seed lookups and `products` demo products in one transaction.
///
/// # Errors
///
/// Returns an error if the connection fails or any insert fails. Nothing is
/// committed on error.
pub async fn catalog(products: usize) -> Result<(), CommandError> {
    let pool = connect().await?;

    let plans: Vec<ProductPlan> = {
        let mut rng = rand::rng();
        (0..products).map(|i| plan_product(&mut rng, i)).collect()
    };

    let mut tx = pool.begin().await?;

    tracing::info!("Seeding lookups: genders, colors, sizes, brand, categories");
    let lookups = upsert_lookups(&mut tx).await?;

    tracing::info!(count = plans.len(), "Creating products with variants and images");
    for plan in &plans {
        let id = insert_product(&mut tx, &lookups, plan).await?;
        tracing::info!(
            product_id = %id,
            variants = plan.variants.len(),
            "Seeded product {}",
            plan.name
        );
    }

    tx.commit().await?;
    tracing::info!("Seeding complete!");
    Ok(())
}

async fn upsert_lookups(tx: &mut Transaction<'_, Postgres>) -> Result<LookupIds, sqlx::Error> {
    let mut genders = Vec::with_capacity(GENDERS.len());
    for (label, slug) in GENDERS {
        let id = sqlx::query_scalar::<_, GenderId>(
            r"
            INSERT INTO storefront.gender (label, slug)
            VALUES ($1, $2)
            ON CONFLICT (slug) DO UPDATE SET label = EXCLUDED.label
            RETURNING id
            ",
        )
        .bind(label)
        .bind(slug)
        .fetch_one(&mut **tx)
        .await?;
        genders.push(id);
    }

    let mut colors = Vec::with_capacity(COLORS.len());
    for (name, slug, hex_code) in COLORS {
        let id = sqlx::query_scalar::<_, ColorId>(
            r"
            INSERT INTO storefront.color (name, slug, hex_code)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name, hex_code = EXCLUDED.hex_code
            RETURNING id
            ",
        )
        .bind(name)
        .bind(slug)
        .bind(hex_code)
        .fetch_one(&mut **tx)
        .await?;
        colors.push(id);
    }

    let mut sizes = Vec::with_capacity(SIZES.len());
    for (name, slug, sort_order) in SIZES {
        let id = sqlx::query_scalar::<_, SizeId>(
            r"
            INSERT INTO storefront.size (name, slug, sort_order)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name, sort_order = EXCLUDED.sort_order
            RETURNING id
            ",
        )
        .bind(name)
        .bind(slug)
        .bind(sort_order)
        .fetch_one(&mut **tx)
        .await?;
        sizes.push(id);
    }

    let mut categories = Vec::with_capacity(CATEGORIES.len());
    for (name, slug) in CATEGORIES {
        let id = sqlx::query_scalar::<_, CategoryId>(
            r"
            INSERT INTO storefront.category (name, slug)
            VALUES ($1, $2)
            ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            ",
        )
        .bind(name)
        .bind(slug)
        .fetch_one(&mut **tx)
        .await?;
        categories.push(id);
    }

    let (brand_name, brand_slug) = BRAND;
    let brand = sqlx::query_scalar::<_, BrandId>(
        r"
        INSERT INTO storefront.brand (name, slug)
        VALUES ($1, $2)
        ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        ",
    )
    .bind(brand_name)
    .bind(brand_slug)
    .fetch_one(&mut **tx)
    .await?;

    Ok(LookupIds {
        genders,
        colors,
        sizes,
        categories,
        brand,
    })
}

async fn insert_product(
    tx: &mut Transaction<'_, Postgres>,
    lookups: &LookupIds,
    plan: &ProductPlan,
) -> Result<ProductId, sqlx::Error> {
    let product_id = ProductId::new(Uuid::new_v4());

    sqlx::query(
        r"
        INSERT INTO storefront.product
            (id, name, description, category_id, gender_id, brand_id, is_published)
        VALUES ($1, $2, $3, $4, $5, $6, TRUE)
        ",
    )
    .bind(product_id)
    .bind(&plan.name)
    .bind(&plan.description)
    .bind(lookups.categories.get(plan.category).copied())
    .bind(lookups.genders.get(plan.gender).copied())
    .bind(lookups.brand)
    .execute(&mut **tx)
    .await?;

    let mut default_variant = None;
    for variant in &plan.variants {
        let (Some(&color_id), Some(&size_id), Some(color), Some(size)) = (
            lookups.colors.get(variant.color),
            lookups.sizes.get(variant.size),
            COLORS.get(variant.color),
            SIZES.get(variant.size),
        ) else {
            continue;
        };

        let variant_id = VariantId::new(Uuid::new_v4());
        sqlx::query(
            r"
            INSERT INTO storefront.product_variant
                (id, product_id, sku, price, sale_price, color_id, size_id, in_stock, weight)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(variant_id)
        .bind(product_id)
        .bind(variant_sku(product_id, color.1, size.1))
        .bind(variant.price)
        .bind(variant.sale_price)
        .bind(color_id)
        .bind(size_id)
        .bind(variant.in_stock)
        .bind(variant.weight)
        .execute(&mut **tx)
        .await?;

        default_variant.get_or_insert(variant_id);
    }

    if let Some(variant_id) = default_variant {
        sqlx::query("UPDATE storefront.product SET default_variant_id = $1 WHERE id = $2")
            .bind(variant_id)
            .bind(product_id)
            .execute(&mut **tx)
            .await?;
    }

    sqlx::query(
        r"
        INSERT INTO storefront.product_image (product_id, url, sort_order, is_primary)
        VALUES ($1, $2, 0, TRUE)
        ",
    )
    .bind(product_id)
    .bind(image_url(product_id, plan.image_file))
    .execute(&mut **tx)
    .await?;

    Ok(product_id)
}
