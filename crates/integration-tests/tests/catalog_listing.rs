//! Integration tests for the catalog listing query.
//!
//! These tests require a `PostgreSQL` database at `TEST_DATABASE_URL`.
//!
//! Run with: cargo test -p stride-integration-tests --test catalog_listing -- --ignored

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use stride_core::ProductId;
use stride_integration_tests::TestContext;
use stride_storefront::catalog::ProductFilters;
use stride_storefront::db::CatalogRepository;
use stride_storefront::models::ProductPage;

async fn list(ctx: &TestContext, query: &str) -> ProductPage {
    CatalogRepository::new(&ctx.pool)
        .list_products(&ProductFilters::from_query(query))
        .await
        .expect("Failed to list products")
}

fn ids(page: &ProductPage) -> Vec<ProductId> {
    page.products.iter().map(|p| p.id).collect()
}

// =============================================================================
// Filtering
// =============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_variant_filters_require_matching_variant() {
    let ctx = TestContext::connect().await.expect("Failed to connect");
    let fx = ctx.fixture();
    let lookups = fx.lookups("trail").await.unwrap();
    let red = fx.color("red", "#FF0000").await.unwrap();
    let nine = fx.size("nine", 2).await.unwrap();
    let ten = fx.size("ten", 3).await.unwrap();
    let now = Utc::now();

    let with_nine = fx.product("Has Nine", lookups, true, now).await.unwrap();
    fx.variant(with_nine, red, nine, Decimal::from(90)).await.unwrap();
    fx.variant(with_nine, red, ten, Decimal::from(95)).await.unwrap();

    let only_ten = fx.product("Only Ten", lookups, true, now).await.unwrap();
    fx.variant(only_ten, red, ten, Decimal::from(100)).await.unwrap();

    let no_variants = fx.product("No Variants", lookups, true, now).await.unwrap();

    let category = fx.slug("trail-category");

    let unfiltered = list(&ctx, &format!("category={category}")).await;
    assert_eq!(unfiltered.total_count, 3);
    assert!(ids(&unfiltered).contains(&no_variants));

    let page = list(&ctx, &format!("category={category}&size={}", fx.slug("nine"))).await;
    assert_eq!(ids(&page), vec![with_nine]);
    assert_eq!(page.total_count, 1);
    // Only the size-9 variant feeds the price aggregates.
    assert_eq!(page.products[0].min_price, Some(Decimal::from(90)));
    assert_eq!(page.products[0].max_price, Some(Decimal::from(90)));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_unpublished_products_are_hidden() {
    let ctx = TestContext::connect().await.expect("Failed to connect");
    let fx = ctx.fixture();
    let lookups = fx.lookups("hidden").await.unwrap();
    let now = Utc::now();

    let shown = fx.product("Shown", lookups, true, now).await.unwrap();
    fx.product("Draft", lookups, false, now).await.unwrap();

    let page = list(&ctx, &format!("category={}", fx.slug("hidden-category"))).await;
    assert_eq!(ids(&page), vec![shown]);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_price_bucket_narrows_variants() {
    let ctx = TestContext::connect().await.expect("Failed to connect");
    let fx = ctx.fixture();
    let lookups = fx.lookups("running").await.unwrap();
    let black = fx.color("black", "#000000").await.unwrap();
    let eight = fx.size("eight", 1).await.unwrap();
    let eleven = fx.size("eleven", 4).await.unwrap();
    let now = Utc::now();

    let p1 = fx.product("P1", lookups, true, now).await.unwrap();
    fx.variant(p1, black, eight, Decimal::from(80)).await.unwrap();
    fx.variant(p1, black, eleven, Decimal::from(120)).await.unwrap();

    let p2 = fx.product("P2", lookups, true, now).await.unwrap();
    fx.variant(p2, black, eight, Decimal::from(200)).await.unwrap();

    let query = format!(
        "category={}&brand={}&gender={}&price=0-150",
        fx.slug("running-category"),
        fx.slug("running-brand"),
        fx.slug("running-gender"),
    );
    let page = list(&ctx, &query).await;

    assert_eq!(page.total_count, 1);
    assert_eq!(ids(&page), vec![p1]);
    assert_eq!(page.products[0].min_price, Some(Decimal::from(80)));
    assert_eq!(page.products[0].max_price, Some(Decimal::from(120)));
    assert!(page.badges.iter().any(|b| b.contains("150")));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_search_matches_name_case_insensitively() {
    let ctx = TestContext::connect().await.expect("Failed to connect");
    let fx = ctx.fixture();
    let lookups = fx.lookups("search").await.unwrap();
    let now = Utc::now();

    let hit = fx.product("Pegasus 50%", lookups, true, now).await.unwrap();
    fx.product("Pegasus 500", lookups, true, now).await.unwrap();

    let page = list(
        &ctx,
        &format!("category={}&search=pegasus%2050%25", fx.slug("search-category")),
    )
    .await;
    assert_eq!(ids(&page), vec![hit]);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_search_with_nul_byte_lists_normally() {
    let ctx = TestContext::connect().await.expect("Failed to connect");
    let fx = ctx.fixture();
    let lookups = fx.lookups("nul").await.unwrap();
    let hit = fx.product("Vomero", lookups, true, Utc::now()).await.unwrap();

    let page = list(
        &ctx,
        &format!("category={}&search=vom%00ero", fx.slug("nul-category")),
    )
    .await;
    assert_eq!(ids(&page), vec![hit]);

    let page = list(&ctx, &format!("category={}&search=%00", fx.slug("nul-category"))).await;
    assert_eq!(ids(&page), vec![hit]);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_dotted_size_slug_filters() {
    let ctx = TestContext::connect().await.expect("Failed to connect");
    let fx = ctx.fixture();
    let lookups = fx.lookups("half").await.unwrap();
    let black = fx.color("black", "#000000").await.unwrap();
    let half = fx.size("10.5", 4).await.unwrap();
    let ten = fx.size("ten", 3).await.unwrap();
    let now = Utc::now();

    let with_half = fx.product("Half Size", lookups, true, now).await.unwrap();
    fx.variant(with_half, black, half, Decimal::from(100)).await.unwrap();
    let whole = fx.product("Whole Size", lookups, true, now).await.unwrap();
    fx.variant(whole, black, ten, Decimal::from(100)).await.unwrap();

    let page = list(
        &ctx,
        &format!("category={}&size={}", fx.slug("half-category"), fx.slug("10.5")),
    )
    .await;
    assert_eq!(page.total_count, 1);
    assert_eq!(ids(&page), vec![with_half]);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_lookup_slugs_must_be_url_safe() {
    let ctx = TestContext::connect().await.expect("Failed to connect");
    let fx = ctx.fixture();

    let rejected =
        sqlx::query("INSERT INTO storefront.size (name, slug, sort_order) VALUES ($1, $2, 0)")
            .bind("Bad")
            .bind(fx.slug("Ten Half"))
            .execute(&ctx.pool)
            .await;
    assert!(rejected.is_err());
}

// =============================================================================
// Counting & Pagination
// =============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_total_count_matches_pages() {
    let ctx = TestContext::connect().await.expect("Failed to connect");
    let fx = ctx.fixture();
    let lookups = fx.lookups("paged").await.unwrap();
    let white = fx.color("white", "#FFFFFF").await.unwrap();
    let seven = fx.size("seven", 0).await.unwrap();
    let twelve = fx.size("twelve", 5).await.unwrap();
    let now = Utc::now();

    for i in 0..5 {
        let id = fx
            .product(&format!("Paged {i}"), lookups, true, now - Duration::minutes(i))
            .await
            .unwrap();
        // Several variants per product must not inflate the count.
        fx.variant(id, white, seven, Decimal::from(100)).await.unwrap();
        fx.variant(id, white, twelve, Decimal::from(110)).await.unwrap();
    }

    let category = fx.slug("paged-category");
    let mut seen = Vec::new();
    for page_number in 1..=3 {
        let page = list(&ctx, &format!("category={category}&limit=2&page={page_number}")).await;
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.limit, 2);
        seen.extend(ids(&page));
    }

    assert_eq!(seen.len(), 5);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 5);

    let past_end = list(&ctx, &format!("category={category}&limit=2&page=4")).await;
    assert!(past_end.products.is_empty());
    assert_eq!(past_end.total_count, 5);
}

// =============================================================================
// Sorting
// =============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_price_sorts_are_mirror_images() {
    let ctx = TestContext::connect().await.expect("Failed to connect");
    let fx = ctx.fixture();
    let lookups = fx.lookups("sorted").await.unwrap();
    let blue = fx.color("blue", "#1E3A8A").await.unwrap();
    let nine = fx.size("nine", 2).await.unwrap();
    let now = Utc::now();

    for (i, price) in [150, 90, 120, 60].into_iter().enumerate() {
        let id = fx
            .product(&format!("Sorted {i}"), lookups, true, now)
            .await
            .unwrap();
        fx.variant(id, blue, nine, Decimal::from(price)).await.unwrap();
    }

    let category = fx.slug("sorted-category");
    let asc = list(&ctx, &format!("category={category}&sort=price_asc")).await;
    let desc = list(&ctx, &format!("category={category}&sort=price_desc")).await;

    let asc_prices: Vec<_> = asc.products.iter().map(|p| p.min_price).collect();
    assert_eq!(
        asc_prices,
        [60, 90, 120, 150].map(|p| Some(Decimal::from(p))).to_vec()
    );

    let mut reversed = ids(&desc);
    reversed.reverse();
    assert_eq!(ids(&asc), reversed);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_equal_timestamps_order_by_id() {
    let ctx = TestContext::connect().await.expect("Failed to connect");
    let fx = ctx.fixture();
    let lookups = fx.lookups("tied").await.unwrap();
    let created_at = Utc::now() - Duration::hours(1);

    let low = ProductId::parse_str("00000000-0000-4000-8000-000000000001").unwrap();
    let high = ProductId::parse_str("ffffffff-0000-4000-8000-000000000001").unwrap();
    // Ids are fixed, so remove leftovers from earlier runs.
    sqlx::query("DELETE FROM storefront.product WHERE id = ANY($1)")
        .bind(vec![low.as_uuid(), high.as_uuid()])
        .execute(&ctx.pool)
        .await
        .unwrap();

    fx.product_with_id(high, "Tied High", lookups, true, created_at)
        .await
        .unwrap();
    fx.product_with_id(low, "Tied Low", lookups, true, created_at)
        .await
        .unwrap();

    let page = list(&ctx, &format!("category={}", fx.slug("tied-category"))).await;
    assert_eq!(ids(&page), vec![low, high]);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_newest_first_by_default() {
    let ctx = TestContext::connect().await.expect("Failed to connect");
    let fx = ctx.fixture();
    let lookups = fx.lookups("newest").await.unwrap();
    let now = Utc::now();

    let older = fx
        .product("Older", lookups, true, now - Duration::days(2))
        .await
        .unwrap();
    let newer = fx.product("Newer", lookups, true, now).await.unwrap();

    let page = list(&ctx, &format!("category={}", fx.slug("newest-category"))).await;
    assert_eq!(ids(&page), vec![newer, older]);
    assert_eq!(page.products[0].subtitle.as_deref(), Some("newest Shoes"));
}
