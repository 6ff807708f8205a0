//! Filter panel options.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::LookupRepository;
use crate::error::Result;
use crate::models::FilterOptions;
use crate::state::AppState;

/// Every lookup value the listing can be filtered by.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<FilterOptions>> {
    let options = LookupRepository::new(state.pool()).filter_options().await?;
    Ok(Json(options))
}
