//! JSON Schema for the configuration file.

use crate::config::WallweaveConfig;

/// Identifier written into the generated schema.
const SCHEMA_ID: &str = "wallweave.schema.json";

/// Generates a JSON Schema for the Wallweave configuration.
///
/// The schema includes all configuration options with their types,
/// descriptions, and default values.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(WallweaveConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(SCHEMA_ID));
    }

    schema
}

/// Generates a pretty-printed JSON Schema string for the configuration.
#[must_use]
pub fn generate_schema_json() -> String {
    let schema = generate_schema();
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_schema_produces_valid_json() {
        let schema_json = generate_schema_json();
        let parsed: serde_json::Value = serde_json::from_str(&schema_json).unwrap();

        assert_eq!(parsed["$id"], SCHEMA_ID);
        assert_eq!(parsed["$schema"], "https://json-schema.org/draft/2020-12/schema");
        assert_eq!(parsed["title"], "WallweaveConfig");
        assert!(parsed["properties"]["compositor"].is_object());
        assert!(parsed["properties"]["display"].is_object());
    }

    #[test]
    fn test_schema_contains_compositor_params() {
        let parsed: serde_json::Value = serde_json::from_str(&generate_schema_json()).unwrap();
        let params = &parsed["$defs"]["CompositeParams"];
        assert!(params.is_object());
        assert!(params["properties"]["blurRadius"].is_object());
        assert!(params["properties"]["fillMode"].is_object());
    }

    #[test]
    fn test_schema_json_is_pretty_printed() {
        assert!(generate_schema_json().contains('\n'));
    }
}
