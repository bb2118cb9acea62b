//! Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::backend::traits::GenerationGateway;
use crate::config::GeminiConfig;
use crate::error::{AppError, GenerationError, Result};
use crate::ingest::ImageRecord;
use crate::response::base64;

/// Gemini-backed image generation
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: RequestBlob<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBlob<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

impl<'a> RequestPart<'a> {
    fn image(record: &'a ImageRecord) -> Self {
        RequestPart::Inline {
            inline_data: RequestBlob {
                mime_type: record.media_type(),
                data: base64::encode(record.payload()),
            },
        }
    }
}

/// Response body of `generateContent`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    #[serde(deserialize_with = "decode_base64")]
    pub data: Vec<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRating {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub probability: Option<String>,
    #[serde(default)]
    pub blocked: bool,
}

fn decode_base64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
    let s = String::deserialize(deserializer)?;
    base64::decode(&s).map_err(serde::de::Error::custom)
}

/// Turn a parsed response into a data URI or a classified failure.
///
/// Only the first candidate is considered. An image part always wins over a
/// blocked safety rating.
pub fn interpret_response(
    response: &GenerateContentResponse,
) -> std::result::Result<String, GenerationError> {
    let Some(candidate) = response.candidates.first() else {
        return Err(GenerationError::NoImageReturned);
    };

    let parts = candidate
        .content
        .as_ref()
        .map(|c| c.parts.as_slice())
        .unwrap_or_default();

    if let Some(inline) = parts.iter().find_map(|p| p.inline_data.as_ref()) {
        return Ok(base64::create_data_url(&inline.data, &inline.mime_type));
    }

    if candidate.safety_ratings.iter().any(|r| r.blocked) {
        return Err(GenerationError::Blocked);
    }

    Err(GenerationError::NoImageReturned)
}

impl GeminiBackend {
    /// Create a new Gemini backend from configuration
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::Internal("GEMINI_API_KEY is not set".to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerationGateway for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        face: &ImageRecord,
        garment: &ImageRecord,
        prompt: &str,
    ) -> std::result::Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::image(face),
                    RequestPart::image(garment),
                    RequestPart::Text { text: prompt },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE", "TEXT"],
            },
        };

        let url = self.endpoint();
        debug!(model = %self.model, url = %url, "Sending generate request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(model = %self.model, error = %e, "Gemini request failed");
                GenerationError::ServiceError(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(model = %self.model, status = %status, "Gemini returned an error status");
            return Err(GenerationError::ServiceError(format!(
                "Backend returned {}: {}",
                status, body
            )));
        }

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| {
                GenerationError::ServiceError(format!("Failed to parse response: {}", e))
            })?;

        let result = interpret_response(&parsed);
        match &result {
            Ok(_) => debug!(model = %self.model, "Gemini returned an image"),
            Err(e) => warn!(model = %self.model, error = %e, "Gemini returned no usable image"),
        }
        result
    }
}
