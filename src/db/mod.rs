use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::LocationId;
use crate::models::{Location, Meetup, Movie, NewLocation, Shop, Weather};

pub mod migrator;
pub mod repositories;

/// Pooled database handle. Cheap to clone; passed explicitly to every
/// service that touches storage.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    fn resource_repo(&self) -> repositories::resources::ResourceRepository {
        repositories::resources::ResourceRepository::new(self.conn.clone())
    }

    pub async fn find_location_by_query(&self, search_query: &str) -> Result<Option<Location>> {
        self.location_repo().find_by_query(search_query).await
    }

    pub async fn get_location(&self, id: LocationId) -> Result<Option<Location>> {
        self.location_repo().get(id).await
    }

    pub async fn insert_location(&self, location: &NewLocation) -> Result<LocationId> {
        self.location_repo().insert(location).await
    }

    pub async fn get_weather(&self, location_id: LocationId) -> Result<Vec<Weather>> {
        self.resource_repo().weather_for(location_id).await
    }

    pub async fn insert_weather(&self, location_id: LocationId, weather: &Weather) -> Result<()> {
        self.resource_repo().insert_weather(location_id, weather).await
    }

    pub async fn get_meetups(&self, location_id: LocationId) -> Result<Vec<Meetup>> {
        self.resource_repo().meetups_for(location_id).await
    }

    pub async fn insert_meetup(&self, location_id: LocationId, meetup: &Meetup) -> Result<()> {
        self.resource_repo().insert_meetup(location_id, meetup).await
    }

    pub async fn get_movies(&self, location_id: LocationId) -> Result<Vec<Movie>> {
        self.resource_repo().movies_for(location_id).await
    }

    pub async fn insert_movie(&self, location_id: LocationId, movie: &Movie) -> Result<()> {
        self.resource_repo().insert_movie(location_id, movie).await
    }

    pub async fn get_shops(&self, location_id: LocationId) -> Result<Vec<Shop>> {
        self.resource_repo().shops_for(location_id).await
    }

    pub async fn insert_shop(&self, location_id: LocationId, shop: &Shop) -> Result<()> {
        self.resource_repo().insert_shop(location_id, shop).await
    }
}

#[cfg(test)]
pub(crate) async fn temp_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("cityscout-unit-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open temp store")
}
