//! Typed view of one value of the source document's top-level mapping.
//!
//! Every field is optional at this level so that a single missing key never
//! fails deserialization of the whole record; the extractor decides which
//! absences are fatal for which entity.
use serde::Deserialize;
use serde_json::{Number, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct HotelRecord {
    pub property_id: Option<i64>,
    pub name: Option<String>,
    /// Reference blocks stay untyped here: a hotel only needs their `id`, and
    /// a badly typed `name` must not cost it the whole record.
    pub category: Option<Value>,
    pub chain: Option<Value>,
    pub location: Option<LocationPayload>,
}

/// The `{id, name}` block shared by `category` and `chain`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferencePayload {
    pub id: Option<RawIdentifier>,
    pub name: Option<String>,
}

/// Dimension ids arrive as JSON strings but integers are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawIdentifier {
    Text(String),
    Integer(i64),
}

impl RawIdentifier {
    /// Reads the `id` of a reference block, if it is a string or an integer.
    pub fn from_block(block: &Value) -> Option<Self> {
        block
            .get("id")
            .and_then(|id| Self::deserialize(id).ok())
    }

    pub fn into_text(self) -> String {
        match self {
            RawIdentifier::Text(text) => text,
            RawIdentifier::Integer(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationPayload {
    pub obfuscation_required: Option<bool>,
    pub coordinates: Option<CoordinatesPayload>,
    pub obfuscated_coordinates: Option<CoordinatesPayload>,
}

/// Latitude/longitude kept as JSON numbers so their text form survives as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct CoordinatesPayload {
    pub latitude: Option<Number>,
    pub longitude: Option<Number>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier_accepts_text_and_integer() {
        let text: RawIdentifier = serde_json::from_value(json!("12")).unwrap();
        let integer: RawIdentifier = serde_json::from_value(json!(12)).unwrap();

        assert_eq!(text.into_text(), "12");
        assert_eq!(integer.into_text(), "12");
    }

    #[test]
    fn test_record_tolerates_missing_blocks() {
        let record: HotelRecord =
            serde_json::from_value(json!({"property_id": 7, "name": "hotel 7"})).unwrap();

        assert_eq!(record.property_id, Some(7));
        assert!(record.category.is_none());
        assert!(record.chain.is_none());
        assert!(record.location.is_none());
    }

    #[test]
    fn test_identifier_from_block_ignores_other_fields() {
        let block = json!({"id": "3", "name": 42});

        assert_eq!(RawIdentifier::from_block(&block), Some(RawIdentifier::Text("3".to_string())));
        assert_eq!(RawIdentifier::from_block(&json!({"id": true})), None);
        assert_eq!(RawIdentifier::from_block(&json!({"name": "x"})), None);
        assert_eq!(RawIdentifier::from_block(&json!("1")), None);
    }

    #[test]
    fn test_coordinates_keep_source_text() {
        let coordinates: CoordinatesPayload =
            serde_json::from_value(json!({"latitude": 1.0, "longitude": 8.864105})).unwrap();

        assert_eq!(coordinates.latitude.unwrap().to_string(), "1.0");
        assert_eq!(coordinates.longitude.unwrap().to_string(), "8.864105");
    }
}
