use crate::domain::LocationId;
use crate::entities::{meetups, movies, prelude::*, shops, weathers};
use crate::models::{Meetup, Movie, Shop, Weather};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

/// Cached provider records, one table per kind, all keyed by `location_id`.
///
/// Rows come back in insertion order and in the same shape that was handed
/// to the client when they were first fetched.
pub struct ResourceRepository {
    conn: DatabaseConnection,
}

impl ResourceRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Weather
    // ========================================================================

    pub async fn weather_for(&self, location_id: LocationId) -> Result<Vec<Weather>> {
        let rows = Weathers::find()
            .filter(weathers::Column::LocationId.eq(location_id.value()))
            .order_by_asc(weathers::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Weather {
                forecast: r.forecast,
                time: r.time,
            })
            .collect())
    }

    pub async fn insert_weather(&self, location_id: LocationId, weather: &Weather) -> Result<()> {
        let active_model = weathers::ActiveModel {
            forecast: Set(weather.forecast.clone()),
            time: Set(weather.time.clone()),
            location_id: Set(location_id.value()),
            ..Default::default()
        };

        Weathers::insert(active_model).exec(&self.conn).await?;
        Ok(())
    }

    // ========================================================================
    // Meetups
    // ========================================================================

    pub async fn meetups_for(&self, location_id: LocationId) -> Result<Vec<Meetup>> {
        let rows = Meetups::find()
            .filter(meetups::Column::LocationId.eq(location_id.value()))
            .order_by_asc(meetups::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Meetup {
                link: r.link,
                name: r.name,
                creation_date: r.creation_date,
                host: r.host,
            })
            .collect())
    }

    pub async fn insert_meetup(&self, location_id: LocationId, meetup: &Meetup) -> Result<()> {
        let active_model = meetups::ActiveModel {
            link: Set(meetup.link.clone()),
            name: Set(meetup.name.clone()),
            creation_date: Set(meetup.creation_date.clone()),
            host: Set(meetup.host.clone()),
            location_id: Set(location_id.value()),
            ..Default::default()
        };

        Meetups::insert(active_model).exec(&self.conn).await?;
        Ok(())
    }

    // ========================================================================
    // Movies
    // ========================================================================

    pub async fn movies_for(&self, location_id: LocationId) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .filter(movies::Column::LocationId.eq(location_id.value()))
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Movie {
                title: r.title,
                overview: r.overview,
                average_votes: r.average_votes,
                total_votes: r.total_votes,
                image_url: r.image_url,
                popularity: r.popularity,
                released_on: r.released_on,
            })
            .collect())
    }

    pub async fn insert_movie(&self, location_id: LocationId, movie: &Movie) -> Result<()> {
        let active_model = movies::ActiveModel {
            title: Set(movie.title.clone()),
            overview: Set(movie.overview.clone()),
            average_votes: Set(movie.average_votes),
            total_votes: Set(movie.total_votes),
            image_url: Set(movie.image_url.clone()),
            popularity: Set(movie.popularity),
            released_on: Set(movie.released_on.clone()),
            location_id: Set(location_id.value()),
            ..Default::default()
        };

        Movies::insert(active_model).exec(&self.conn).await?;
        Ok(())
    }

    // ========================================================================
    // Shops
    // ========================================================================

    pub async fn shops_for(&self, location_id: LocationId) -> Result<Vec<Shop>> {
        let rows = Shops::find()
            .filter(shops::Column::LocationId.eq(location_id.value()))
            .order_by_asc(shops::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Shop {
                name: r.name,
                image_url: r.image_url,
                price: r.price,
                rating: r.rating,
                url: r.url,
            })
            .collect())
    }

    pub async fn insert_shop(&self, location_id: LocationId, shop: &Shop) -> Result<()> {
        let active_model = shops::ActiveModel {
            name: Set(shop.name.clone()),
            image_url: Set(shop.image_url.clone()),
            price: Set(shop.price.clone()),
            rating: Set(shop.rating),
            url: Set(shop.url.clone()),
            location_id: Set(location_id.value()),
            ..Default::default()
        };

        Shops::insert(active_model).exec(&self.conn).await?;
        Ok(())
    }
}
