use std::collections::HashMap;

use hotel_migrator_shared::types::{CoordinatesPayload, LocationPayload, RawIdentifier, ReferencePayload};
use hotel_migrator_shared::{Category, Chain, Dimension, Hotel, HotelRecord};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Why a record could not produce an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionIssue {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("missing key `{0}`")]
    MissingField(&'static str),
    #[error("malformed `{field}`: {reason}")]
    Malformed { field: &'static str, reason: String },
}

/// Result of parsing one record for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome<T> {
    Parsed(T),
    /// The optional block for this entity is not in the record.
    Absent,
    Rejected(ExtractionIssue),
}

/// Per-pass counts and messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionDiagnostics {
    pub seen: usize,
    pub absent: usize,
    pub skipped: usize,
    pub duplicates: usize,
    pub messages: Vec<String>,
}

/// Entities produced by one extraction pass, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<T> {
    pub entities: Vec<T>,
    pub diagnostics: ExtractionDiagnostics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedInventory {
    pub categories: Extraction<Category>,
    pub chains: Extraction<Chain>,
    pub hotels: Extraction<Hotel>,
}

/// Builds domain entities out of raw source records.
///
/// The three passes are independent: each walks the full record sequence
/// and never lets a bad record abort the walk.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Runs the category, chain and hotel passes over the same records.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub fn extract_all(&self, records: &[Value]) -> ExtractedInventory {
        ExtractedInventory {
            categories: self.extract_categories(records),
            chains: self.extract_chains(records),
            hotels: self.extract_hotels(records),
        }
    }

    pub fn extract_categories(&self, records: &[Value]) -> Extraction<Category> {
        self.extract_dimensions(records)
    }

    pub fn extract_chains(&self, records: &[Value]) -> Extraction<Chain> {
        self.extract_dimensions(records)
    }

    /// Extracts one dimension, deduplicated by id.
    ///
    /// The first occurrence of an id wins; later records carrying the same id
    /// are counted as duplicates even when their name differs, matching the
    /// insert-if-absent policy of the loader.
    pub fn extract_dimensions<D: Dimension>(&self, records: &[Value]) -> Extraction<D> {
        let kind = D::KIND;
        let mut diagnostics = ExtractionDiagnostics::default();
        let mut entities: Vec<D> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (index, record) in records.iter().enumerate() {
            diagnostics.seen += 1;
            match parse_dimension::<D>(record) {
                RecordOutcome::Parsed(dimension) => {
                    if let Some(&position) = positions.get(dimension.id()) {
                        diagnostics.duplicates += 1;
                        let kept = &entities[position];
                        if kept.name() != dimension.name() {
                            diagnostics.messages.push(format!(
                                "record {index}: {kind} {} already seen as '{}', dropping name '{}'",
                                dimension.id(),
                                kept.name(),
                                dimension.name()
                            ));
                        }
                        continue;
                    }
                    positions.insert(dimension.id().to_string(), entities.len());
                    entities.push(dimension);
                }
                RecordOutcome::Absent => diagnostics.absent += 1,
                RecordOutcome::Rejected(issue) => {
                    warn!(record = index, %kind, %issue, "Skipping reference block");
                    diagnostics.skipped += 1;
                    diagnostics
                        .messages
                        .push(format!("record {index}: skipped {kind}, {issue}"));
                }
            }
        }

        debug!(
            %kind,
            extracted = entities.len(),
            skipped = diagnostics.skipped,
            duplicates = diagnostics.duplicates,
            "Extracted dimension"
        );
        Extraction {
            entities,
            diagnostics,
        }
    }

    /// Extracts one hotel per record.
    ///
    /// Hotels are not deduplicated: a repeated `property_id` is left for the
    /// strict hotel insert to surface.
    pub fn extract_hotels(&self, records: &[Value]) -> Extraction<Hotel> {
        let mut diagnostics = ExtractionDiagnostics::default();
        let mut entities = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            diagnostics.seen += 1;
            match parse_hotel(record) {
                RecordOutcome::Parsed(hotel) => entities.push(hotel),
                RecordOutcome::Absent => diagnostics.absent += 1,
                RecordOutcome::Rejected(issue) => {
                    warn!(record = index, %issue, "Skipping hotel");
                    diagnostics.skipped += 1;
                    diagnostics
                        .messages
                        .push(format!("record {index}: skipped hotel, {issue}"));
                }
            }
        }

        debug!(
            extracted = entities.len(),
            skipped = diagnostics.skipped,
            "Extracted hotels"
        );
        Extraction {
            entities,
            diagnostics,
        }
    }
}

/// Parses the `category`/`chain` block of a record.
pub fn parse_dimension<D: Dimension>(record: &Value) -> RecordOutcome<D> {
    match dimension_from_record::<D>(record) {
        Ok(Some(dimension)) => RecordOutcome::Parsed(dimension),
        Ok(None) => RecordOutcome::Absent,
        Err(issue) => RecordOutcome::Rejected(issue),
    }
}

/// Parses a record into a hotel. Never yields `Absent`.
pub fn parse_hotel(record: &Value) -> RecordOutcome<Hotel> {
    match hotel_from_record(record) {
        Ok(hotel) => RecordOutcome::Parsed(hotel),
        Err(issue) => RecordOutcome::Rejected(issue),
    }
}

fn dimension_from_record<D: Dimension>(record: &Value) -> Result<Option<D>, ExtractionIssue> {
    let kind = D::KIND;
    let object = record.as_object().ok_or(ExtractionIssue::NotAnObject)?;
    let block = match object.get(kind.field()) {
        None | Some(Value::Null) => return Ok(None),
        Some(block) => block,
    };

    let payload: ReferencePayload =
        serde_json::from_value(block.clone()).map_err(|e| ExtractionIssue::Malformed {
            field: kind.field(),
            reason: e.to_string(),
        })?;
    let id = payload
        .id
        .ok_or(ExtractionIssue::MissingField(kind.id_field()))?;
    let name = payload
        .name
        .ok_or(ExtractionIssue::MissingField(kind.name_field()))?;

    Ok(Some(D::new(id.into_text(), name)))
}

fn hotel_from_record(record: &Value) -> Result<Hotel, ExtractionIssue> {
    if !record.is_object() {
        return Err(ExtractionIssue::NotAnObject);
    }
    let record: HotelRecord =
        serde_json::from_value(record.clone()).map_err(|e| ExtractionIssue::Malformed {
            field: "record",
            reason: e.to_string(),
        })?;

    let id = record
        .property_id
        .ok_or(ExtractionIssue::MissingField("property_id"))?;
    let name = record.name.ok_or(ExtractionIssue::MissingField("name"))?;
    let location = record
        .location
        .as_ref()
        .ok_or(ExtractionIssue::MissingField("location"))
        .and_then(render_location)?;

    Ok(Hotel {
        id,
        name,
        category_id: reference_id(record.category.as_ref()),
        chain_id: reference_id(record.chain.as_ref()),
        location,
    })
}

/// Only the `id` of a hotel's reference block matters; a block whose `id`
/// is neither text nor an integer yields no reference.
fn reference_id(block: Option<&Value>) -> Option<String> {
    block
        .and_then(RawIdentifier::from_block)
        .map(RawIdentifier::into_text)
}

/// Renders `"<latitude>,<longitude>"` from the branch selected by
/// `obfuscation_required`. A missing field in the selected branch is an
/// error; the other branch is never consulted.
fn render_location(location: &LocationPayload) -> Result<String, ExtractionIssue> {
    let obfuscated = location
        .obfuscation_required
        .ok_or(ExtractionIssue::MissingField("location.obfuscation_required"))?;

    let (coordinates, field, latitude_field, longitude_field) = if obfuscated {
        (
            &location.obfuscated_coordinates,
            "location.obfuscated_coordinates",
            "location.obfuscated_coordinates.latitude",
            "location.obfuscated_coordinates.longitude",
        )
    } else {
        (
            &location.coordinates,
            "location.coordinates",
            "location.coordinates.latitude",
            "location.coordinates.longitude",
        )
    };

    let CoordinatesPayload {
        latitude,
        longitude,
    } = coordinates
        .as_ref()
        .ok_or(ExtractionIssue::MissingField(field))?;
    let latitude = latitude
        .as_ref()
        .ok_or(ExtractionIssue::MissingField(latitude_field))?;
    let longitude = longitude
        .as_ref()
        .ok_or(ExtractionIssue::MissingField(longitude_field))?;

    Ok(format!("{latitude},{longitude}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> Value {
        json!({
            "property_id": 99999999,
            "category": {"id": "1", "name": "Test_Category"},
            "chain": {"id": "0", "name": "Test_Chain"},
            "location": {
                "coordinates": {"latitude": 1.0, "longitude": 2.0},
                "obfuscation_required": false
            },
            "name": "hotel 249"
        })
    }

    #[test]
    fn test_extract_single_record() {
        let inventory = EntityExtractor::new().extract_all(&[sample_record()]);

        assert_eq!(
            inventory.categories.entities,
            vec![Category {
                id: "1".to_string(),
                name: "Test_Category".to_string()
            }]
        );
        assert_eq!(
            inventory.chains.entities,
            vec![Chain {
                id: "0".to_string(),
                name: "Test_Chain".to_string()
            }]
        );
        assert_eq!(
            inventory.hotels.entities,
            vec![Hotel {
                id: 99999999,
                name: "hotel 249".to_string(),
                category_id: Some("1".to_string()),
                chain_id: Some("0".to_string()),
                location: "1.0,2.0".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_category_keeps_first_name() {
        let mut second = sample_record();
        second["property_id"] = json!(2);
        second["category"]["name"] = json!("Renamed");

        let extraction = EntityExtractor::new().extract_categories(&[sample_record(), second]);

        assert_eq!(extraction.entities.len(), 1);
        assert_eq!(extraction.entities[0].name, "Test_Category");
        assert_eq!(extraction.diagnostics.duplicates, 1);
        assert_eq!(extraction.diagnostics.messages.len(), 1);
    }

    #[test]
    fn test_dimensions_keep_first_seen_order() {
        let records: Vec<Value> = ["7", "3", "7", "5"]
            .iter()
            .map(|id| json!({"chain": {"id": id, "name": format!("chain {id}")}}))
            .collect();

        let extraction = EntityExtractor::new().extract_chains(&records);

        let ids: Vec<&str> = extraction.entities.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "3", "5"]);
        assert_eq!(extraction.diagnostics.duplicates, 1);
        // Same name, so nothing worth reporting.
        assert!(extraction.diagnostics.messages.is_empty());
    }

    #[test]
    fn test_missing_category_block_is_not_an_error() {
        let mut record = sample_record();
        record.as_object_mut().unwrap().remove("category");

        let extraction = EntityExtractor::new().extract_categories(&[record.clone()]);
        let hotels = EntityExtractor::new().extract_hotels(&[record]);

        assert!(extraction.entities.is_empty());
        assert_eq!(extraction.diagnostics.absent, 1);
        assert_eq!(extraction.diagnostics.skipped, 0);
        assert_eq!(hotels.entities[0].category_id, None);
    }

    #[test]
    fn test_category_without_name_is_skipped() {
        let mut record = sample_record();
        record["category"] = json!({"id": "4"});

        let extraction = EntityExtractor::new().extract_categories(&[record]);

        assert!(extraction.entities.is_empty());
        assert_eq!(extraction.diagnostics.skipped, 1);
        assert!(extraction.diagnostics.messages[0].contains("category.name"));
    }

    #[test]
    fn test_integer_dimension_id_is_carried_as_text() {
        let record = json!({"chain": {"id": 12, "name": "Numeric"}});

        let outcome = parse_dimension::<Chain>(&record);

        assert_eq!(
            outcome,
            RecordOutcome::Parsed(Chain {
                id: "12".to_string(),
                name: "Numeric".to_string()
            })
        );
    }

    #[test]
    fn test_obfuscated_coordinates_take_precedence() {
        let record = json!({
            "property_id": 1,
            "name": "hidden",
            "location": {
                "obfuscation_required": true,
                "coordinates": {"latitude": 42.60803, "longitude": 8.864105},
                "obfuscated_coordinates": {"latitude": 42.6, "longitude": 8.86}
            }
        });

        match parse_hotel(&record) {
            RecordOutcome::Parsed(hotel) => assert_eq!(hotel.location, "42.6,8.86"),
            other => panic!("Expected a hotel, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_selected_branch_does_not_fall_back() {
        let record = json!({
            "property_id": 1,
            "name": "hidden",
            "location": {
                "obfuscation_required": true,
                "coordinates": {"latitude": 42.60803, "longitude": 8.864105}
            }
        });

        assert_eq!(
            parse_hotel(&record),
            RecordOutcome::Rejected(ExtractionIssue::MissingField(
                "location.obfuscated_coordinates"
            ))
        );
    }

    #[test]
    fn test_missing_longitude_is_reported() {
        let mut record = sample_record();
        record["location"]["coordinates"] = json!({"latitude": 1.0});

        assert_eq!(
            parse_hotel(&record),
            RecordOutcome::Rejected(ExtractionIssue::MissingField(
                "location.coordinates.longitude"
            ))
        );
    }

    #[test]
    fn test_hotel_without_required_fields_is_skipped() {
        let mut without_id = sample_record();
        without_id.as_object_mut().unwrap().remove("property_id");
        let mut without_name = sample_record();
        without_name.as_object_mut().unwrap().remove("name");
        let mut without_location = sample_record();
        without_location.as_object_mut().unwrap().remove("location");

        let extraction = EntityExtractor::new().extract_hotels(&[
            without_id,
            sample_record(),
            without_name,
            without_location,
        ]);

        assert_eq!(extraction.entities.len(), 1);
        assert_eq!(extraction.diagnostics.seen, 4);
        assert_eq!(extraction.diagnostics.skipped, 3);
        assert!(extraction.diagnostics.messages[0].contains("property_id"));
        assert!(extraction.diagnostics.messages[1].contains("`name`"));
        assert!(extraction.diagnostics.messages[2].contains("`location`"));
    }

    #[test]
    fn test_textual_property_id_is_malformed() {
        let mut record = sample_record();
        record["property_id"] = json!("99999999");

        assert!(matches!(
            parse_hotel(&record),
            RecordOutcome::Rejected(ExtractionIssue::Malformed { field: "record", .. })
        ));
    }

    #[test]
    fn test_extraction_issue_messages() {
        assert_eq!(ExtractionIssue::NotAnObject.to_string(), "record is not a JSON object");
        assert_eq!(
            ExtractionIssue::MissingField("property_id").to_string(),
            "missing key `property_id`"
        );
    }

    #[test]
    fn test_badly_typed_reference_block_keeps_the_hotel() {
        let mut record = sample_record();
        record["category"] = json!({"id": "1", "name": 42});
        record["chain"] = json!({"id": true, "name": "Test_Chain"});

        let hotel = match parse_hotel(&record) {
            RecordOutcome::Parsed(hotel) => hotel,
            other => panic!("Expected Parsed, got {other:?}"),
        };
        assert_eq!(hotel.category_id.as_deref(), Some("1"));
        assert_eq!(hotel.chain_id, None);

        // The category block itself is still unusable as a dimension.
        let categories = EntityExtractor::new().extract_categories(&[record]);
        assert!(categories.entities.is_empty());
        assert_eq!(categories.diagnostics.skipped, 1);
    }

    #[test]
    fn test_non_object_record_is_skipped_by_every_pass() {
        let records = vec![json!("not a hotel"), sample_record()];
        let inventory = EntityExtractor::new().extract_all(&records);

        assert_eq!(inventory.categories.diagnostics.skipped, 1);
        assert_eq!(inventory.chains.diagnostics.skipped, 1);
        assert_eq!(inventory.hotels.diagnostics.skipped, 1);
        assert_eq!(inventory.hotels.entities.len(), 1);
    }

    #[test]
    fn test_repeated_hotel_ids_are_kept() {
        let extraction = EntityExtractor::new().extract_hotels(&[sample_record(), sample_record()]);

        assert_eq!(extraction.entities.len(), 2);
    }
}
