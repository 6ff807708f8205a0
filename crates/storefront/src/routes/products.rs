//! Product route handlers.

use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use serde::Serialize;
use tracing::instrument;

use stride_core::ProductId;

use crate::catalog::ProductFilters;
use crate::db::{CatalogRepository, ProductRepository, ReviewRepository};
use crate::error::{AppError, Result};
use crate::models::{FullProduct, GalleryVariant, ProductPage, RecommendedProduct, ReviewSummary};
use crate::state::AppState;

/// Product detail response: the assembled product plus its per-variant
/// image galleries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: FullProduct,
    pub gallery: Vec<GalleryVariant>,
}

/// A path id that is not a UUID names no product.
fn parse_product_id(raw: &str) -> Option<ProductId> {
    ProductId::parse_str(raw).ok()
}

/// Product listing.
///
/// Reads the raw query string so repeated (`color=a&color=b`) and
/// bracketed (`color[]=a`) keys both work.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ProductPage>> {
    let filters = ProductFilters::from_query(query.as_deref().unwrap_or_default());
    let page = CatalogRepository::new(state.pool())
        .list_products(&filters)
        .await?;
    Ok(Json(page))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetail>> {
    let not_found = || AppError::NotFound(format!("product {id}"));

    let product_id = parse_product_id(&id).ok_or_else(not_found)?;
    let product = ProductRepository::new(state.pool())
        .get_product(product_id)
        .await?
        .ok_or_else(not_found)?;

    let gallery = product.gallery();
    Ok(Json(ProductDetail { product, gallery }))
}

/// Related products for the detail page.
#[instrument(skip(state))]
pub async fn recommendations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RecommendedProduct>>> {
    let Some(product_id) = parse_product_id(&id) else {
        return Ok(Json(Vec::new()));
    };

    let picked = ProductRepository::new(state.pool())
        .recommended_products(product_id)
        .await?;
    Ok(Json(picked))
}

/// Most recent reviews and their average.
#[instrument(skip(state))]
pub async fn reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReviewSummary>> {
    let Some(product_id) = parse_product_id(&id) else {
        return Ok(Json(ReviewSummary::empty()));
    };

    let summary = ReviewRepository::new(state.pool())
        .recent_reviews(product_id)
        .await?;
    Ok(Json(summary))
}
