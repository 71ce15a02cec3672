use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

/// Documented body of `POST /api/save-plot`. The handler reads the raw JSON
/// and only checks `name` and `image` (see [`has_required_fields`]); the other
/// fields are accepted whatever their type.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavePlotRequest {
    pub name: Option<String>,
    /// PNG data URL produced by the editor's export.
    pub image: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub grid_size: Option<u32>,
}

/// JavaScript truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// True when the body carries truthy `name` and `image` fields. Nothing else
/// about the body is checked.
pub fn has_required_fields(body: &Value) -> bool {
    let present = |key: &str| body.get(key).is_some_and(is_truthy);
    present("name") && present("image")
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavePlotResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZoneResponse {
    pub zipcode: String,
    pub growing_zone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_fields_present() {
        assert!(has_required_fields(&json!({ "name": "A", "image": "data:image/png;base64," })));
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        assert!(!has_required_fields(&json!({})));
        assert!(!has_required_fields(&json!({ "name": "", "image": "data:" })));
        assert!(!has_required_fields(&json!({ "name": "A", "image": null })));
        assert!(!has_required_fields(&json!({ "name": 0, "image": "data:" })));
        assert!(!has_required_fields(&json!({ "name": false, "image": "data:" })));
        assert!(!has_required_fields(&json!(["name", "image"])));
    }

    #[test]
    fn test_loose_types_are_accepted() {
        assert!(has_required_fields(&json!({ "name": 7, "image": "data:x" })));
        assert!(has_required_fields(&json!({
            "name": "A", "image": "data:x", "width": 600.5, "height": "400", "gridSize": -1
        })));
    }

    #[test]
    fn test_schema_deserializes_camel_case() {
        let req: SavePlotRequest = serde_json::from_value(json!({
            "name": "A", "image": "data:", "gridSize": 20
        }))
        .unwrap();
        assert_eq!(req.grid_size, Some(20));
        assert_eq!(req.width, None);
    }
}
