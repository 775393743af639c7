use serde::{Deserialize, Serialize};

/// Placeholder record for hiking trails.
///
/// No trail fields are mapped yet, so every trail serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trail {}

impl From<&serde_json::Value> for Trail {
    fn from(_raw: &serde_json::Value) -> Self {
        Self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_input_maps_to_empty_record() {
        let raw = serde_json::json!({
            "name": "Rattlesnake Ledge",
            "length": 4.0,
            "stars": 4.5
        });

        let trail = Trail::from(&raw);
        assert_eq!(serde_json::to_string(&trail).unwrap(), "{}");
        assert_eq!(Trail::from(&serde_json::Value::Null), Trail::default());
    }
}
