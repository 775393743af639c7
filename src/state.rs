use std::sync::Arc;

use crate::clients::{Providers, build_shared_http_client};
use crate::config::Config;
use crate::db::Store;
use crate::services::{LocationService, ResourceService};

/// Everything a request handler needs, built once at startup. There is no
/// process-wide singleton: the store and provider clients are handed to the
/// services explicitly.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub location_service: Arc<LocationService>,

    pub resource_service: Arc<ResourceService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        // One pooled client shared by every provider.
        let http_client = build_shared_http_client(&config.providers)?;
        let providers = Providers::new(&http_client, &config.providers);

        let location_service = Arc::new(LocationService::new(
            store.clone(),
            providers.geocode.clone(),
        ));

        let resource_service = Arc::new(ResourceService::new(
            store.clone(),
            providers,
            config.cache.write_mode,
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            location_service,
            resource_service,
        })
    }
}
