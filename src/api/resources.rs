use axum::{
    Json,
    extract::{Query, State},
};
use std::collections::HashMap;
use std::sync::Arc;

use super::{ApiError, AppState, LocationPayload};
use crate::services::ResourceKind;

/// Shared handler for every resource route. The kind decides which table is
/// consulted and which provider fills it on a miss.
pub async fn lookup<K: ResourceKind>(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<K::Record>>, ApiError> {
    let request = LocationPayload::from_query(&params)?.into_request()?;

    let records = state.resources().lookup_or_fetch::<K>(&request).await?;

    Ok(Json(records))
}
