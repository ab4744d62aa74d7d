use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerateError, Generator, TokenUsage};
use crate::consts::{DEFAULT_API_BASE, DEFAULT_MODEL};

const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// A generator that calls the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiGenerator {
    pub fn new(api_key: impl Into<String>, model: Option<String>, api_base: Option<&str>) -> Self {
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base = api_base.unwrap_or(DEFAULT_API_BASE).trim_end_matches('/');
        Self {
            endpoint: format!("{base}/{API_VERSION}/models/{model}:generateContent"),
            model,
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(prompt: &str) -> ApiRequest<'_> {
        ApiRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        }
    }

    /// Pull the answer out of a decoded response: every text part of the
    /// first candidate, joined in order.
    fn extract_text(resp: ApiResponse) -> Result<String, GenerateError> {
        let candidate = match resp.candidates.into_iter().next() {
            Some(candidate) => candidate,
            None => {
                if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
                    return Err(GenerateError::Blocked(reason));
                }
                return Err(GenerateError::Empty);
            }
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            return match candidate.finish_reason {
                Some(reason) if reason != "STOP" => Err(GenerateError::Blocked(reason)),
                _ => Err(GenerateError::Empty),
            };
        }

        Ok(text)
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = Self::build_request(prompt);

        let resp = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(GenerateError::Status { status, body: text });
        }

        let api_resp: ApiResponse = serde_json::from_str(&text)?;

        if let Some(usage) = api_resp.usage_metadata.as_ref().map(TokenUsage::from) {
            debug!(
                model = %self.model,
                input = usage.input_tokens,
                output = usage.output_tokens,
                total = usage.total(),
                "gemini token usage"
            );
        }

        Self::extract_text(api_resp)
    }
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    contents: Vec<Content<'a>>,
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

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
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

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

impl From<&UsageMetadata> for TokenUsage {
    fn from(usage: &UsageMetadata) -> Self {
        Self {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
        }
    }
}
