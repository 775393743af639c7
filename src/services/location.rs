//! Resolution of raw search strings into stored locations.

use tracing::{debug, info, warn};

use crate::clients::geocode::GeocodeClient;
use crate::db::Store;
use crate::models::{Location, NewLocation};
use crate::services::LookupError;

pub struct LocationService {
    store: Store,
    geocode: GeocodeClient,
}

impl LocationService {
    #[must_use]
    pub const fn new(store: Store, geocode: GeocodeClient) -> Self {
        Self { store, geocode }
    }

    /// Returns the stored location for `query`, geocoding and storing it on
    /// first use.
    ///
    /// The lookup is an exact string match. A provider answer with no
    /// results is a [`LookupError::NoResults`].
    pub async fn resolve(&self, query: &str) -> Result<Location, LookupError> {
        if query.trim().is_empty() {
            return Err(LookupError::invalid("search query cannot be empty"));
        }

        if let Some(location) = self
            .store
            .find_location_by_query(query)
            .await
            .map_err(LookupError::database)?
        {
            debug!("Location '{}' served from database", query);
            metrics::counter!("cache_lookups_total", "kind" => "location", "outcome" => "hit")
                .increment(1);
            return Ok(location);
        }

        metrics::counter!("cache_lookups_total", "kind" => "location", "outcome" => "miss")
            .increment(1);

        let result = self
            .geocode
            .geocode(query)
            .await?
            .ok_or_else(|| LookupError::NoResults {
                provider: "Geocode",
                query: query.to_string(),
            })?;

        let new_location = NewLocation::from_geocode(query, &result);

        match self.store.insert_location(&new_location).await {
            Ok(id) => {
                info!("Resolved '{}' to {} (id {})", query, new_location.formatted_query, id);
                Ok(new_location.with_id(id))
            }
            Err(e) => {
                // A concurrent request may have stored the same search string first.
                if let Some(existing) = self
                    .store
                    .find_location_by_query(query)
                    .await
                    .map_err(LookupError::database)?
                {
                    warn!("Location '{}' was stored concurrently, reusing id {}", query, existing.id);
                    return Ok(existing);
                }
                Err(LookupError::database(e))
            }
        }
    }
}
