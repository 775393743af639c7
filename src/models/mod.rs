//! Canonical record shapes returned to clients, and the per-kind mappings
//! from raw provider payloads into them.

pub mod location;
pub mod meetup;
pub mod movie;
pub mod shop;
pub mod trail;
pub mod weather;

pub use location::{Location, NewLocation};
pub use meetup::Meetup;
pub use movie::Movie;
pub use shop::Shop;
pub use trail::Trail;
pub use weather::Weather;

use chrono::DateTime;

/// Formats a timestamp the way the front end has always displayed dates,
/// e.g. `Wed Jan 01 2020`. Out-of-range timestamps yield an empty string.
pub(crate) fn short_date<Tz>(at: Option<DateTime<Tz>>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.map(|t| t.format("%a %b %d %Y").to_string())
        .unwrap_or_default()
}
