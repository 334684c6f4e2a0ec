use serde::{Deserialize, Serialize};

use super::prompt::build_extraction_prompt;
use super::schema::{entity_response_schema, Schema};
use super::types::ClinicalEntity;
use super::ExtractError;
use crate::config::GeminiConfig;

/// Sampling temperature. Low, so repeated runs map to the same codes.
const EXTRACTION_TEMPERATURE: f32 = 0.2;

/// Cap on raw envelope text carried inside a MalformedResponse diagnostic.
const ENVELOPE_SNIPPET_MAX: usize = 2048;

/// Narrow seam over the extraction call (allows mocking).
pub trait EntityExtractor {
    fn extract(&self, narrative: &str) -> Result<Vec<ClinicalEntity>, ExtractError>;
}

/// Blocking HTTP client for the Gemini generateContent endpoint.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    timeout_secs: u64,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    /// Create a client from explicit configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
            timeout_secs: config.timeout_secs,
            client,
        }
    }

    /// Full endpoint URL. The credential rides as a query parameter, so this
    /// must never appear in logs or error messages.
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

/// Request body for generateContent.
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Schema,
    temperature: f32,
}

/// Response envelope from generateContent. Only the path we read is modeled;
/// the generated payload lives at `candidates[0].content.parts[0].text`.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl EntityExtractor for GeminiClient {
    /// One synchronous POST, no retry. A failed attempt surfaces immediately.
    fn extract(&self, narrative: &str) -> Result<Vec<ClinicalEntity>, ExtractError> {
        let prompt = build_extraction_prompt(narrative);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: entity_response_schema(),
                temperature: EXTRACTION_TEMPERATURE,
            },
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "sending extraction request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ExtractError::Connection(format!("cannot reach {}: connect failed", self.base_url))
                } else if e.is_timeout() {
                    ExtractError::Connection(format!(
                        "request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    // without_url: the URL carries the API key
                    ExtractError::Connection(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ExtractError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response
            .text()
            .map_err(|e| ExtractError::Processing(e.without_url().to_string()))?;

        let entities = parse_generate_response(&raw)?;
        tracing::info!(count = entities.len(), "Gemini returned candidate entities");
        Ok(entities)
    }
}

/// Parse the generateContent envelope down to the entity list.
///
/// The generated payload is a JSON-encoded string inside the envelope: an
/// envelope without that path is `MalformedResponse` (carrying the raw body),
/// an inner string that is not a valid entity array is `Decode`.
pub fn parse_generate_response(raw: &str) -> Result<Vec<ClinicalEntity>, ExtractError> {
    let envelope: GenerateContentResponse =
        serde_json::from_str(raw).map_err(|_| ExtractError::MalformedResponse(snippet(raw)))?;

    let text = envelope
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.as_deref())
        .ok_or_else(|| ExtractError::MalformedResponse(snippet(raw)))?;

    serde_json::from_str(text).map_err(|e| ExtractError::Decode(e.to_string()))
}

/// Truncate the raw envelope for diagnostics (char-boundary safe).
fn snippet(raw: &str) -> String {
    if raw.chars().count() <= ENVELOPE_SNIPPET_MAX {
        raw.to_string()
    } else {
        raw.chars().take(ENVELOPE_SNIPPET_MAX).collect()
    }
}

/// Mock extractor for testing — returns a configured payload or failure.
pub struct MockExtractor {
    entities: Vec<ClinicalEntity>,
    failure: Option<String>,
}

impl MockExtractor {
    pub fn new(entities: Vec<ClinicalEntity>) -> Self {
        Self {
            entities,
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            entities: Vec::new(),
            failure: Some(message.to_string()),
        }
    }
}

impl EntityExtractor for MockExtractor {
    fn extract(&self, _narrative: &str) -> Result<Vec<ClinicalEntity>, ExtractError> {
        match &self.failure {
            Some(message) => Err(ExtractError::Connection(message.clone())),
            None => Ok(self.entities.clone()),
        }
    }
}
