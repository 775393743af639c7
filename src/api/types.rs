use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::ApiError;
use super::validation::{validate_coordinates, validate_location_id, validate_search_query};
use crate::domain::LocationId;
use crate::services::ResourceRequest;

/// Query parameter that carries the location payload.
pub const PAYLOAD_PARAM: &str = "data";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub data: Option<String>,
}

/// The location a client echoes back when asking for resources. Extra
/// fields such as `formatted_query` are accepted and ignored.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct LocationPayload {
    #[serde(default, deserialize_with = "lenient_i32")]
    pub id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub search_query: Option<String>,
}

impl LocationPayload {
    /// Reads the payload from either `data=<json>` or the bracket form
    /// `data[id]=1&data[latitude]=47.6`.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, ApiError> {
        let object = if let Some(raw) = params.get(PAYLOAD_PARAM) {
            match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(ApiError::validation("data must be a JSON object"));
                }
                Err(e) => {
                    return Err(ApiError::validation(format!("data is not valid JSON: {e}")));
                }
            }
        } else {
            bracket_fields(params)
        };

        if object.is_empty() {
            return Err(ApiError::validation("Missing location payload in data"));
        }

        serde_json::from_value(Value::Object(object))
            .map_err(|e| ApiError::validation(format!("Invalid location payload: {e}")))
    }

    pub fn into_request(self) -> Result<ResourceRequest, ApiError> {
        let id = self
            .id
            .ok_or_else(|| ApiError::validation("Location payload requires an id"))?;
        let mut request = ResourceRequest::new(LocationId::new(validate_location_id(id)?));

        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                request = request.with_coordinates(validate_coordinates(latitude, longitude)?);
            }
            (None, None) => {}
            _ => {
                return Err(ApiError::validation(
                    "latitude and longitude must be provided together",
                ));
            }
        }

        if let Some(query) = self.search_query {
            request = request.with_search_query(validate_search_query(&query)?);
        }

        Ok(request)
    }
}

fn bracket_fields(params: &HashMap<String, String>) -> Map<String, Value> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let field = key
                .strip_prefix(PAYLOAD_PARAM)?
                .strip_prefix('[')?
                .strip_suffix(']')?;
            Some((field.to_string(), Value::String(value.clone())))
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<NumberOrString>::deserialize(deserializer)? else {
        return Ok(None);
    };
    raw.as_f64()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom("expected a number or numeric string"))
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<NumberOrString>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let parsed = match &raw {
        NumberOrString::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        NumberOrString::Text(s) => s.trim().parse().ok(),
    };
    parsed
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom("expected an integer id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_json_payload_with_numbers() {
        let payload = LocationPayload::from_query(&params(&[(
            "data",
            r#"{"id":3,"search_query":"seattle","formatted_query":"Seattle, WA, USA","latitude":47.6,"longitude":-122.3}"#,
        )]))
        .unwrap();

        assert_eq!(payload.id, Some(3));
        assert_eq!(payload.latitude, Some(47.6));
        assert_eq!(payload.longitude, Some(-122.3));
        assert_eq!(payload.search_query.as_deref(), Some("seattle"));
    }

    #[test]
    fn test_json_payload_with_numeric_strings() {
        let payload = LocationPayload::from_query(&params(&[(
            "data",
            r#"{"id":"3","latitude":"47.6","longitude":"-122.3"}"#,
        )]))
        .unwrap();

        assert_eq!(payload.id, Some(3));
        assert_eq!(payload.latitude, Some(47.6));
    }

    #[test]
    fn test_bracket_payload() {
        let payload = LocationPayload::from_query(&params(&[
            ("data[id]", "7"),
            ("data[latitude]", "10.5"),
            ("data[longitude]", "20.25"),
            ("unrelated", "x"),
        ]))
        .unwrap();

        assert_eq!(payload.id, Some(7));
        assert_eq!(payload.longitude, Some(20.25));
        assert!(payload.search_query.is_none());
    }

    #[test]
    fn test_missing_payload_is_rejected() {
        assert!(LocationPayload::from_query(&params(&[])).is_err());
        assert!(LocationPayload::from_query(&params(&[("data", "[1,2]")])).is_err());
        assert!(LocationPayload::from_query(&params(&[("data", "{not json")])).is_err());
    }

    #[test]
    fn test_non_numeric_latitude_is_rejected() {
        let result = LocationPayload::from_query(&params(&[
            ("data[id]", "1"),
            ("data[latitude]", "north"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_into_request() {
        let request = LocationPayload {
            id: Some(4),
            latitude: Some(1.0),
            longitude: Some(2.0),
            search_query: Some("lisbon".to_string()),
        }
        .into_request()
        .unwrap();

        assert_eq!(request.location_id, LocationId::new(4));
        assert_eq!(request.coordinates.map(|c| c.latitude), Some(1.0));
        assert_eq!(request.search_query.as_deref(), Some("lisbon"));
    }

    #[test]
    fn test_into_request_requires_id_and_paired_coordinates() {
        assert!(LocationPayload::default().into_request().is_err());

        let half = LocationPayload {
            id: Some(1),
            latitude: Some(1.0),
            ..Default::default()
        };
        assert!(half.into_request().is_err());
    }
}
