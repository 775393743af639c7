use serde::{Deserialize, Serialize};

use crate::clients::geocode::GeocodeResult;
use crate::domain::LocationId;

/// A resolved place. Immutable once stored; unique by `search_query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
    pub id: LocationId,
}

/// A location built from a geocoding answer that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewLocation {
    #[must_use]
    pub fn from_geocode(search_query: &str, result: &GeocodeResult) -> Self {
        Self {
            search_query: search_query.to_string(),
            formatted_query: result.formatted_address.clone(),
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
        }
    }

    /// Attaches the id generated by the insert.
    #[must_use]
    pub fn with_id(self, id: LocationId) -> Location {
        Location {
            search_query: self.search_query,
            formatted_query: self.formatted_query,
            latitude: self.latitude,
            longitude: self.longitude,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::geocode::{Geometry, LatLng};

    #[test]
    fn from_geocode_uses_first_result_fields() {
        let result = GeocodeResult {
            formatted_address: "Lynnwood, WA, USA".to_string(),
            geometry: Geometry {
                location: LatLng {
                    lat: 47.820_930_1,
                    lng: -122.315_131_3,
                },
            },
        };

        let location = NewLocation::from_geocode("lynnwood", &result).with_id(LocationId::new(9));

        assert_eq!(location.search_query, "lynnwood");
        assert_eq!(location.formatted_query, "Lynnwood, WA, USA");
        assert_eq!(location.id.value(), 9);
        assert_eq!(location.latitude, 47.820_930_1);
        assert_eq!(location.longitude, -122.315_131_3);
    }

    #[test]
    fn serializes_with_id_last() {
        let location = Location {
            search_query: "x".to_string(),
            formatted_query: "X".to_string(),
            latitude: 1.5,
            longitude: 2.5,
            id: LocationId::new(1),
        };

        let json = serde_json::to_string(&location).unwrap();
        assert_eq!(
            json,
            r#"{"search_query":"x","formatted_query":"X","latitude":1.5,"longitude":2.5,"id":1}"#
        );
    }
}
