//! AI gateway port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::SourceCitation;

/// Gateway errors
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("The AI model returned an empty response.")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// A generated transcript together with the grounding sources behind it
#[derive(Debug, Clone)]
pub struct GeneratedTranscript {
    pub text: String,
    pub citations: Vec<SourceCitation>,
}

/// Port for the generative-AI backend.
///
/// Each operation is a single stateless request/response exchange;
/// the analysis session sequences them because later stages depend
/// on earlier outputs.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Generate a transcript for the video behind `source_url` using a
    /// search-grounded request, returning the citations that grounded it.
    async fn generate_transcript(
        &self,
        source_url: &str,
    ) -> Result<GeneratedTranscript, GatewayError>;

    /// Translate `text` into the language named `language`.
    async fn translate(&self, text: &str, language: &str) -> Result<String, GatewayError>;

    /// Summarize `text`, localized to the language named `language`.
    async fn summarize(&self, text: &str, language: &str) -> Result<String, GatewayError>;

    /// Answer `question` strictly from `context`, localized to `language`.
    async fn answer(
        &self,
        context: &str,
        question: &str,
        language: &str,
    ) -> Result<String, GatewayError>;
}
