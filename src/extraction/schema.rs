//! Typed declaration of the `responseSchema` sent with every extraction
//! request. Constrains Gemini to emit an array of entity objects that
//! deserialize directly into `ClinicalEntity`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Allowed `semanticCategory` values.
pub const SEMANTIC_CATEGORIES: &[&str] = &[
    "disorder",
    "finding",
    "procedure",
    "observable entity",
    "medicinal product",
];

/// Allowed `confidenceScore` values.
pub const CONFIDENCE_LEVELS: &[&str] = &["High", "Medium", "Low"];

/// Allowed `context` values.
pub const CONTEXT_VALUES: &[&str] = &["present", "absent", "unknown"];

/// Allowed `laterality` values.
pub const LATERALITY_VALUES: &[&str] = &["left", "right", "bilateral", "N/A"];

/// Allowed `severity` values.
pub const SEVERITY_VALUES: &[&str] = &["mild", "moderate", "severe", "N/A"];

/// Fields Gemini must populate on every entity.
pub const REQUIRED_FIELDS: &[&str] = &["text", "semanticCategory", "confidenceScore", "context"];

/// Subset of the Gemini response-schema grammar this crate uses.
///
/// Gemini spells type names in uppercase (ARRAY, OBJECT, STRING).
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    enum_values: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<Schema>>,
    #[serde(
        serialize_with = "properties_as_map",
        skip_serializing_if = "Option::is_none"
    )]
    properties: Option<Vec<(&'static str, Schema)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<&'static [&'static str]>,
}

#[derive(Debug, Clone, Copy, Serialize)]
enum SchemaType {
    #[serde(rename = "ARRAY")]
    Array,
    #[serde(rename = "OBJECT")]
    Object,
    #[serde(rename = "STRING")]
    String,
}

impl Schema {
    fn string(description: &'static str) -> Self {
        Self {
            kind: SchemaType::String,
            description: Some(description),
            enum_values: None,
            items: None,
            properties: None,
            required: None,
        }
    }

    fn string_enum(values: &'static [&'static str], description: &'static str) -> Self {
        Self {
            enum_values: Some(values),
            ..Self::string(description)
        }
    }

    fn object(
        properties: Vec<(&'static str, Schema)>,
        required: &'static [&'static str],
    ) -> Self {
        Self {
            kind: SchemaType::Object,
            description: None,
            enum_values: None,
            items: None,
            properties: Some(properties),
            required: Some(required),
        }
    }

    fn array(items: Schema) -> Self {
        Self {
            kind: SchemaType::Array,
            description: None,
            enum_values: None,
            items: Some(Box::new(items)),
            properties: None,
            required: None,
        }
    }
}

/// Serialize the property list as a JSON object, preserving declaration order.
fn properties_as_map<S>(
    properties: &Option<Vec<(&'static str, Schema)>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let entries = properties.as_deref().unwrap_or_default();
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (name, schema) in entries {
        map.serialize_entry(name, schema)?;
    }
    map.end()
}

/// Response schema for entity extraction: an array of entity objects whose
/// field names and enumerations match `ClinicalEntity` exactly.
pub fn entity_response_schema() -> Schema {
    Schema::array(Schema::object(
        vec![
            (
                "text",
                Schema::string("The exact clinical term extracted from the text."),
            ),
            (
                "snomedCode",
                Schema::string(
                    "The most appropriate SNOMED CT code (SCTID) for the concept. \
                     Leave empty if unsure.",
                ),
            ),
            (
                "preferredTerm",
                Schema::string(
                    "The SNOMED CT Preferred Term for the concept. Leave empty if unsure.",
                ),
            ),
            (
                "semanticCategory",
                Schema::string_enum(
                    SEMANTIC_CATEGORIES,
                    "The semantic category of the concept (e.g., disorder, finding, \
                     procedure, observable entity, medicinal product).",
                ),
            ),
            (
                "confidenceScore",
                Schema::string_enum(
                    CONFIDENCE_LEVELS,
                    "Confidence in the accuracy of the extracted concept and its SNOMED \
                     mapping (High, Medium, or Low).",
                ),
            ),
            (
                "context",
                Schema::string_enum(
                    CONTEXT_VALUES,
                    "The context of the term (present, absent, or unknown).",
                ),
            ),
            (
                "laterality",
                Schema::string_enum(
                    LATERALITY_VALUES,
                    "Laterality of the concept, if applicable (left, right, bilateral, or N/A).",
                ),
            ),
            (
                "severity",
                Schema::string_enum(
                    SEVERITY_VALUES,
                    "Severity of the concept, if applicable (mild, moderate, severe, or N/A).",
                ),
            ),
            (
                "singularForm",
                Schema::string("The singular form of the extracted term, if applicable."),
            ),
        ],
        REQUIRED_FIELDS,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::types::{
        Confidence, Laterality, SemanticCategory, Severity, TermContext,
    };

    #[test]
    fn schema_shape_matches_contract() {
        let value = serde_json::to_value(entity_response_schema()).unwrap();

        assert_eq!(value["type"], "ARRAY");
        assert_eq!(value["items"]["type"], "OBJECT");

        let properties = value["items"]["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 9);
        for field in [
            "text",
            "snomedCode",
            "preferredTerm",
            "semanticCategory",
            "confidenceScore",
            "context",
            "laterality",
            "severity",
            "singularForm",
        ] {
            assert!(properties.contains_key(field), "missing {field}");
            assert_eq!(properties[field]["type"], "STRING");
        }

        let required: Vec<&str> = value["items"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec!["text", "semanticCategory", "confidenceScore", "context"]
        );
    }

    #[test]
    fn enum_constraints_present() {
        let value = serde_json::to_value(entity_response_schema()).unwrap();
        let properties = &value["items"]["properties"];

        assert_eq!(
            properties["semanticCategory"]["enum"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
        assert_eq!(properties["confidenceScore"]["enum"][0], "High");
        assert_eq!(properties["laterality"]["enum"][3], "N/A");
        // Free-text fields carry no enum constraint.
        assert!(properties["text"].get("enum").is_none());
        assert!(properties["singularForm"].get("enum").is_none());
    }

    // Every schema enum string must deserialize into its Rust counterpart,
    // otherwise entity decoding would reject schema-valid output.
    #[test]
    fn schema_enums_match_entity_types() {
        for v in SEMANTIC_CATEGORIES {
            let quoted = format!("\"{v}\"");
            serde_json::from_str::<SemanticCategory>(&quoted).unwrap();
        }
        for v in CONFIDENCE_LEVELS {
            let quoted = format!("\"{v}\"");
            serde_json::from_str::<Confidence>(&quoted).unwrap();
        }
        for v in CONTEXT_VALUES {
            let quoted = format!("\"{v}\"");
            serde_json::from_str::<TermContext>(&quoted).unwrap();
        }
        for v in LATERALITY_VALUES {
            let quoted = format!("\"{v}\"");
            serde_json::from_str::<Laterality>(&quoted).unwrap();
        }
        for v in SEVERITY_VALUES {
            let quoted = format!("\"{v}\"");
            serde_json::from_str::<Severity>(&quoted).unwrap();
        }
    }
}
