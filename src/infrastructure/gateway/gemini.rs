//! Gemini API gateway adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AiGateway, GatewayError, GeneratedTranscript};
use crate::domain::analysis::{Prompt, SourceCitation};

/// Gemini API model to use
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// Request types for Gemini API

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

// Response types for Gemini API

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    grounding_chunks: Option<Vec<GroundingChunk>>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Gemini-backed AI gateway
pub struct GeminiGateway {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiGateway {
    /// Create a new gateway with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a new gateway with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL (used by tests against a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Build the request body
    fn build_request(prompt: &Prompt, with_search: bool) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.content().to_string(),
                }],
            }],
            tools: with_search.then(|| {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            }),
        }
    }

    /// Issue one generateContent request and parse the response
    async fn generate(
        &self,
        body: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let response = self
            .client
            .post(self.api_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::ParseError(e.to_string()))?;

        // Check for API error in response body
        if let Some(error) = response.error {
            return Err(GatewayError::ApiError(error.message));
        }

        Ok(response)
    }

    /// Run a plain text prompt and return the response text
    async fn prompt_for_text(&self, prompt: &Prompt) -> Result<String, GatewayError> {
        let response = self.generate(Self::build_request(prompt, false)).await?;
        Self::extract_text(&response).ok_or(GatewayError::EmptyResponse)
    }

    /// Extract text from response
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        let text = parts.join("");
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Extract grounding citations from response metadata.
    /// Chunks without a URI are dropped; missing titles get a placeholder.
    fn extract_citations(response: &GenerateContentResponse) -> Vec<SourceCitation> {
        response
            .candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.grounding_metadata.as_ref())
            .and_then(|metadata| metadata.grounding_chunks.as_ref())
            .map(|chunks| {
                chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| {
                        web.uri
                            .clone()
                            .map(|uri| SourceCitation::new(uri, web.title.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl AiGateway for GeminiGateway {
    async fn generate_transcript(
        &self,
        source_url: &str,
    ) -> Result<GeneratedTranscript, GatewayError> {
        let prompt = Prompt::transcript_search(source_url);
        let response = self.generate(Self::build_request(&prompt, true)).await?;

        let citations = Self::extract_citations(&response);
        let text = Self::extract_text(&response).ok_or(GatewayError::EmptyResponse)?;

        Ok(GeneratedTranscript { text, citations })
    }

    async fn translate(&self, text: &str, language: &str) -> Result<String, GatewayError> {
        self.prompt_for_text(&Prompt::translation(text, language))
            .await
    }

    async fn summarize(&self, text: &str, language: &str) -> Result<String, GatewayError> {
        self.prompt_for_text(&Prompt::summary(text, language)).await
    }

    async fn answer(
        &self,
        context: &str,
        question: &str,
        language: &str,
    ) -> Result<String, GatewayError> {
        self.prompt_for_text(&Prompt::grounded_answer(context, question, language))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::UNTITLED_SOURCE;

    #[test]
    fn build_request_has_correct_structure() {
        let prompt = Prompt::summary("some transcript", "English");
        let request = GeminiGateway::build_request(&prompt, false);

        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, "user");
        assert!(request.contents[0].parts[0].text.contains("some transcript"));
        assert!(request.tools.is_none());
    }

    #[test]
    fn build_request_with_search_carries_tool() {
        let prompt = Prompt::transcript_search("https://youtube.com/watch?v=abc");
        let request = GeminiGateway::build_request(&prompt, true);

        assert_eq!(request.tools.as_ref().map(Vec::len), Some(1));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["tools"][0]["googleSearch"], serde_json::json!({}));
    }

    #[test]
    fn api_url_contains_model_and_key() {
        let gateway = GeminiGateway::new("test-api-key");
        let url = gateway.api_url();

        assert!(url.contains("gemini-2.5-flash"));
        assert!(url.contains("test-api-key"));
        assert!(url.contains("generateContent"));
    }

    #[test]
    fn custom_model_and_base_url() {
        let gateway =
            GeminiGateway::with_model("key", "custom-model").with_base_url("http://localhost:9999");
        let url = gateway.api_url();

        assert!(url.starts_with("http://localhost:9999/custom-model"));
    }

    #[test]
    fn extract_text_from_response() {
        let response = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(CandidateContent {
                    parts: Some(vec![ResponsePart {
                        text: Some("Hello world".to_string()),
                    }]),
                }),
                grounding_metadata: None,
            }]),
            error: None,
        };

        let text = GeminiGateway::extract_text(&response);
        assert_eq!(text, Some("Hello world".to_string()));
    }

    #[test]
    fn extract_text_empty_response() {
        let response = GenerateContentResponse {
            candidates: None,
            error: None,
        };

        assert!(GeminiGateway::extract_text(&response).is_none());
    }

    #[test]
    fn extract_text_whitespace_only_is_none() {
        let response = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(CandidateContent {
                    parts: Some(vec![ResponsePart {
                        text: Some("   \n".to_string()),
                    }]),
                }),
                grounding_metadata: None,
            }]),
            error: None,
        };

        assert!(GeminiGateway::extract_text(&response).is_none());
    }

    #[test]
    fn extract_citations_defaults_and_skips() {
        let response = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: None,
                grounding_metadata: Some(GroundingMetadata {
                    grounding_chunks: Some(vec![
                        GroundingChunk {
                            web: Some(WebSource {
                                uri: Some("https://example.com/a".to_string()),
                                title: Some("Example".to_string()),
                            }),
                        },
                        GroundingChunk {
                            web: Some(WebSource {
                                uri: Some("https://example.com/b".to_string()),
                                title: None,
                            }),
                        },
                        GroundingChunk {
                            web: Some(WebSource {
                                uri: None,
                                title: Some("no uri".to_string()),
                            }),
                        },
                        GroundingChunk { web: None },
                    ]),
                }),
            }]),
            error: None,
        };

        let citations = GeminiGateway::extract_citations(&response);
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0].title, "Example");
        assert_eq!(citations[1].title, UNTITLED_SOURCE);
    }

    #[test]
    fn extract_citations_absent_metadata_is_empty() {
        let response = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: None,
                grounding_metadata: None,
            }]),
            error: None,
        };

        assert!(GeminiGateway::extract_citations(&response).is_empty());
    }
}
