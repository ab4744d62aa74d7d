pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Why a generation call failed. Kept intact for the logs; users only ever
/// see a fixed message.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("request to the model API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode model API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("prompt was blocked by the model API ({0})")]
    Blocked(String),

    #[error("model API returned no text")]
    Empty,

    #[error("{0}")]
    Other(String),
}

/// Token usage reported by a single call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    /// Total tokens (input + output).
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Turns a prompt into text. Could be Gemini or a test script.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}
