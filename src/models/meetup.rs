use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::short_date;
use crate::clients::meetup::MeetupEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meetup {
    pub link: String,
    pub name: String,
    pub creation_date: String,
    pub host: String,
}

impl From<&MeetupEvent> for Meetup {
    fn from(event: &MeetupEvent) -> Self {
        Self {
            link: event.link.clone(),
            name: event.group.name.clone(),
            creation_date: short_date(
                event
                    .group
                    .created
                    .and_then(DateTime::<Utc>::from_timestamp_millis),
            ),
            host: event.group.who.clone(),
        }
    }
}
