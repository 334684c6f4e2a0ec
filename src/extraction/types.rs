use serde::{Deserialize, Serialize};

/// A single clinical concept extracted by Gemini and mapped to SNOMED CT.
///
/// Field names on the wire are camelCase, matching the response schema the
/// client declares in its request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalEntity {
    /// Exact term as it appears in the narrative.
    pub text: String,
    /// SNOMED CT identifier (SCTID). Empty or absent when the model is unsure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snomed_code: Option<String>,
    /// SNOMED CT Preferred Term for the mapped concept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_term: Option<String>,
    pub semantic_category: SemanticCategory,
    pub confidence_score: Confidence,
    pub context: TermContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laterality: Option<Laterality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    /// Singular form of the extracted term, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular_form: Option<String>,
}

impl ClinicalEntity {
    /// Whether the entity carries a usable SNOMED code (non-blank after trim).
    pub fn has_snomed_code(&self) -> bool {
        self.snomed_code
            .as_deref()
            .is_some_and(|code| !code.trim().is_empty())
    }
}

/// SNOMED CT semantic category of an extracted concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemanticCategory {
    #[serde(rename = "disorder")]
    Disorder,
    #[serde(rename = "finding")]
    Finding,
    #[serde(rename = "procedure")]
    Procedure,
    #[serde(rename = "observable entity")]
    ObservableEntity,
    #[serde(rename = "medicinal product")]
    MedicinalProduct,
}

impl SemanticCategory {
    /// Wire/display form, identical to the serde rename.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disorder => "disorder",
            Self::Finding => "finding",
            Self::Procedure => "procedure",
            Self::ObservableEntity => "observable entity",
            Self::MedicinalProduct => "medicinal product",
        }
    }
}

/// Model's confidence in the extraction and its SNOMED mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Whether the concept is asserted, negated, or indeterminate in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermContext {
    Present,
    Absent,
    Unknown,
}

impl TermContext {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Unknown => "unknown",
        }
    }
}

/// Body side the concept applies to, when applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Laterality {
    Left,
    Right,
    Bilateral,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Laterality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Bilateral => "bilateral",
            Self::NotApplicable => "N/A",
        }
    }
}

/// Severity grading, when applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::NotApplicable => "N/A",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_entity() {
        let json = r#"{
            "text": "lemah pada separuh tubuh kanan",
            "snomedCode": "278286009",
            "preferredTerm": "Right hemiparesis",
            "semanticCategory": "finding",
            "confidenceScore": "High",
            "context": "present",
            "laterality": "right",
            "severity": "N/A",
            "singularForm": "lemah separuh tubuh"
        }"#;
        let entity: ClinicalEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.text, "lemah pada separuh tubuh kanan");
        assert_eq!(entity.snomed_code.as_deref(), Some("278286009"));
        assert_eq!(entity.semantic_category, SemanticCategory::Finding);
        assert_eq!(entity.confidence_score, Confidence::High);
        assert_eq!(entity.context, TermContext::Present);
        assert_eq!(entity.laterality, Some(Laterality::Right));
        assert_eq!(entity.severity, Some(Severity::NotApplicable));
        assert!(entity.has_snomed_code());
    }

    #[test]
    fn deserialize_minimal_entity() {
        // Only the four schema-required fields.
        let json = r#"{
            "text": "hipertensi",
            "semanticCategory": "disorder",
            "confidenceScore": "Medium",
            "context": "present"
        }"#;
        let entity: ClinicalEntity = serde_json::from_str(json).unwrap();
        assert!(entity.snomed_code.is_none());
        assert!(entity.preferred_term.is_none());
        assert!(entity.laterality.is_none());
        assert!(entity.severity.is_none());
        assert!(entity.singular_form.is_none());
        assert!(!entity.has_snomed_code());
    }

    #[test]
    fn multiword_category_round_trips() {
        let json = r#""observable entity""#;
        let category: SemanticCategory = serde_json::from_str(json).unwrap();
        assert_eq!(category, SemanticCategory::ObservableEntity);
        assert_eq!(serde_json::to_string(&category).unwrap(), json);
        assert_eq!(category.as_str(), "observable entity");
    }

    #[test]
    fn not_applicable_spelled_na() {
        let laterality: Laterality = serde_json::from_str(r#""N/A""#).unwrap();
        assert_eq!(laterality, Laterality::NotApplicable);
        let severity: Severity = serde_json::from_str(r#""N/A""#).unwrap();
        assert_eq!(severity.as_str(), "N/A");
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result: Result<SemanticCategory, _> = serde_json::from_str(r#""body structure""#);
        assert!(result.is_err());
    }

    #[test]
    fn blank_code_is_not_usable() {
        let json = r#"{
            "text": "demam",
            "snomedCode": "   ",
            "semanticCategory": "finding",
            "confidenceScore": "Low",
            "context": "unknown"
        }"#;
        let entity: ClinicalEntity = serde_json::from_str(json).unwrap();
        assert!(!entity.has_snomed_code());
    }
}
