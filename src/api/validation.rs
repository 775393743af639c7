use super::ApiError;
use crate::domain::Coordinates;

pub fn validate_location_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid location ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

/// Rejects blank input only. The query is kept exactly as sent since it is
/// the lookup key.
pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    if query.trim().is_empty() {
        return Err(ApiError::validation("Search query cannot be empty"));
    }
    Ok(query)
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<Coordinates, ApiError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ApiError::validation(format!(
            "Invalid latitude: {latitude}. Must be between -90 and 90"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::validation(format!(
            "Invalid longitude: {longitude}. Must be between -180 and 180"
        )));
    }
    Ok(Coordinates::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_location_id() {
        assert!(validate_location_id(1).is_ok());
        assert!(validate_location_id(0).is_err());
        assert!(validate_location_id(-5).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  seattle ").unwrap(), "  seattle ");
        assert!(validate_search_query("   ").is_err());
        assert!(validate_search_query("").is_err());

        let long = "a".repeat(300);
        assert_eq!(validate_search_query(&long).unwrap(), long);
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(47.6, -122.3).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
    }
}
