use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::validation::validate_search_query;
use super::{ApiError, AppState, LocationQuery};
use crate::models::Location;

/// `GET /location?data=<search string>`
///
/// Returns the stored location for the string, geocoding and saving it on
/// first sight.
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Location>, ApiError> {
    let raw = query
        .data
        .ok_or_else(|| ApiError::validation("Missing search string in data"))?;
    let search = validate_search_query(&raw)?;

    let location = state.locations().resolve(search).await?;

    Ok(Json(location))
}
