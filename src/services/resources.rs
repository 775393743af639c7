//! The lookup-or-fetch routine shared by every resource kind.
//!
//! A kind is "cached" for a location as soon as one row of it exists. On a
//! miss the kind's provider is called once, each item is mapped into the
//! canonical record, every record is inserted on its own, and the mapped
//! list is returned without re-reading the table.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clients::Providers;
use crate::config::CacheWriteMode;
use crate::db::Store;
use crate::domain::{Coordinates, LocationId};
use crate::models::{Meetup, Movie, Shop, Trail, Weather};
use crate::services::LookupError;

/// What a client knows about a resolved location when asking for resources.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    pub location_id: LocationId,
    pub coordinates: Option<Coordinates>,
    pub search_query: Option<String>,
}

impl ResourceRequest {
    #[must_use]
    pub const fn new(location_id: LocationId) -> Self {
        Self {
            location_id,
            coordinates: None,
            search_query: None,
        }
    }

    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    #[must_use]
    pub fn with_search_query(mut self, search_query: impl Into<String>) -> Self {
        self.search_query = Some(search_query.into());
        self
    }

    pub fn require_coordinates(&self, kind: &str) -> Result<Coordinates, LookupError> {
        self.coordinates.ok_or_else(|| {
            LookupError::invalid(format!("{kind} lookup requires latitude and longitude"))
        })
    }

    pub fn require_search_query(&self, kind: &str) -> Result<&str, LookupError> {
        self.search_query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| LookupError::invalid(format!("{kind} lookup requires search_query")))
    }
}

/// One cacheable resource: where its rows live, which provider fills them,
/// and how provider items map to records.
#[async_trait::async_trait]
pub trait ResourceKind: Send + Sync + 'static {
    type Record: Serialize + Clone + Send + Sync + 'static;

    /// Label used in logs and metrics.
    const NAME: &'static str;

    async fn cached(store: &Store, location_id: LocationId) -> anyhow::Result<Vec<Self::Record>>;

    async fn fetch(
        providers: &Providers,
        request: &ResourceRequest,
    ) -> Result<Vec<Self::Record>, LookupError>;

    async fn persist(
        store: &Store,
        location_id: LocationId,
        record: &Self::Record,
    ) -> anyhow::Result<()>;
}

pub struct Weathers;

#[async_trait::async_trait]
impl ResourceKind for Weathers {
    type Record = Weather;
    const NAME: &'static str = "weather";

    async fn cached(store: &Store, location_id: LocationId) -> anyhow::Result<Vec<Weather>> {
        store.get_weather(location_id).await
    }

    async fn fetch(
        providers: &Providers,
        request: &ResourceRequest,
    ) -> Result<Vec<Weather>, LookupError> {
        let at = request.require_coordinates(Self::NAME)?;
        let days = providers.weather.daily_forecast(at).await?;
        Ok(days.iter().map(Weather::from).collect())
    }

    async fn persist(store: &Store, location_id: LocationId, record: &Weather) -> anyhow::Result<()> {
        store.insert_weather(location_id, record).await
    }
}

pub struct Meetups;

#[async_trait::async_trait]
impl ResourceKind for Meetups {
    type Record = Meetup;
    const NAME: &'static str = "meetups";

    async fn cached(store: &Store, location_id: LocationId) -> anyhow::Result<Vec<Meetup>> {
        store.get_meetups(location_id).await
    }

    async fn fetch(
        providers: &Providers,
        request: &ResourceRequest,
    ) -> Result<Vec<Meetup>, LookupError> {
        let near = request.require_coordinates(Self::NAME)?;
        let events = providers.meetup.upcoming_events(near).await?;
        Ok(events.iter().map(Meetup::from).collect())
    }

    async fn persist(store: &Store, location_id: LocationId, record: &Meetup) -> anyhow::Result<()> {
        store.insert_meetup(location_id, record).await
    }
}

pub struct Movies;

#[async_trait::async_trait]
impl ResourceKind for Movies {
    type Record = Movie;
    const NAME: &'static str = "movies";

    async fn cached(store: &Store, location_id: LocationId) -> anyhow::Result<Vec<Movie>> {
        store.get_movies(location_id).await
    }

    async fn fetch(
        providers: &Providers,
        request: &ResourceRequest,
    ) -> Result<Vec<Movie>, LookupError> {
        let query = request.require_search_query(Self::NAME)?;
        let movies = providers.movies.search(query).await?;
        Ok(movies.iter().map(Movie::from).collect())
    }

    async fn persist(store: &Store, location_id: LocationId, record: &Movie) -> anyhow::Result<()> {
        store.insert_movie(location_id, record).await
    }
}

pub struct Shops;

#[async_trait::async_trait]
impl ResourceKind for Shops {
    type Record = Shop;
    const NAME: &'static str = "yelp";

    async fn cached(store: &Store, location_id: LocationId) -> anyhow::Result<Vec<Shop>> {
        store.get_shops(location_id).await
    }

    async fn fetch(
        providers: &Providers,
        request: &ResourceRequest,
    ) -> Result<Vec<Shop>, LookupError> {
        let near = request.require_coordinates(Self::NAME)?;
        let businesses = providers.yelp.search_businesses(near).await?;
        Ok(businesses.iter().map(Shop::from).collect())
    }

    async fn persist(store: &Store, location_id: LocationId, record: &Shop) -> anyhow::Result<()> {
        store.insert_shop(location_id, record).await
    }
}

/// Trails have neither a provider nor a table yet, so every lookup is an
/// empty miss.
pub struct Trails;

#[async_trait::async_trait]
impl ResourceKind for Trails {
    type Record = Trail;
    const NAME: &'static str = "trails";

    async fn cached(_store: &Store, _location_id: LocationId) -> anyhow::Result<Vec<Trail>> {
        Ok(Vec::new())
    }

    async fn fetch(
        _providers: &Providers,
        _request: &ResourceRequest,
    ) -> Result<Vec<Trail>, LookupError> {
        // No trail provider is wired up, so there is never anything to map.
        let raw: Vec<serde_json::Value> = Vec::new();
        Ok(raw.iter().map(Trail::from).collect())
    }

    async fn persist(_store: &Store, _location_id: LocationId, _record: &Trail) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct ResourceService {
    store: Store,
    providers: Providers,
    write_mode: CacheWriteMode,
}

impl ResourceService {
    #[must_use]
    pub const fn new(store: Store, providers: Providers, write_mode: CacheWriteMode) -> Self {
        Self {
            store,
            providers,
            write_mode,
        }
    }

    /// Returns the stored records of kind `K` for the location, fetching
    /// and storing them first if none exist.
    pub async fn lookup_or_fetch<K: ResourceKind>(
        &self,
        request: &ResourceRequest,
    ) -> Result<Vec<K::Record>, LookupError> {
        let location_id = request.location_id;

        let cached = K::cached(&self.store, location_id)
            .await
            .map_err(LookupError::database)?;

        if !cached.is_empty() {
            debug!(
                "{} for location {} served from database ({} rows)",
                K::NAME,
                location_id,
                cached.len()
            );
            metrics::counter!("cache_lookups_total", "kind" => K::NAME, "outcome" => "hit")
                .increment(1);
            return Ok(cached);
        }

        metrics::counter!("cache_lookups_total", "kind" => K::NAME, "outcome" => "miss")
            .increment(1);

        let records = K::fetch(&self.providers, request).await?;

        info!(
            "Fetched {} {} record(s) for location {}",
            records.len(),
            K::NAME,
            location_id
        );

        match self.write_mode {
            CacheWriteMode::Awaited => {
                persist_all::<K>(&self.store, location_id, &records).await;
            }
            CacheWriteMode::Background => {
                let store = self.store.clone();
                let pending = records.clone();
                tokio::spawn(async move {
                    persist_all::<K>(&store, location_id, &pending).await;
                });
            }
        }

        Ok(records)
    }
}

/// Inserts each record independently. A failed insert is logged and counted
/// and never stops the remaining ones.
async fn persist_all<K: ResourceKind>(
    store: &Store,
    location_id: LocationId,
    records: &[K::Record],
) {
    for record in records {
        if let Err(e) = K::persist(store, location_id, record).await {
            warn!(
                "Failed to cache {} record for location {}: {}",
                K::NAME,
                location_id,
                e
            );
            metrics::counter!("cache_write_failures_total", "kind" => K::NAME).increment(1);
        }
    }
}
