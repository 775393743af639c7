use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::short_date;
use crate::clients::weather::ForecastDay;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    pub forecast: String,
    pub time: String,
}

impl From<&ForecastDay> for Weather {
    fn from(day: &ForecastDay) -> Self {
        Self {
            forecast: day.summary.clone(),
            time: short_date(DateTime::<Utc>::from_timestamp(day.time, 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_summary_and_formats_seconds() {
        let day = ForecastDay {
            time: 1_540_018_800,
            summary: "Partly cloudy in the morning.".to_string(),
        };

        assert_eq!(
            Weather::from(&day),
            Weather {
                forecast: "Partly cloudy in the morning.".to_string(),
                time: "Sat Oct 20 2018".to_string(),
            }
        );
    }
}
