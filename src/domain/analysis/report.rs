//! Analysis session data model

use super::Stage;

/// Title used when a grounding source has no title of its own
pub const UNTITLED_SOURCE: &str = "Untitled Source";

/// A user-submitted analysis request.
/// Immutable once handed to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// URL of the video to analyze
    pub source_url: String,
    /// Target language code for the summary (e.g. "es")
    pub target_language: String,
}

impl AnalysisRequest {
    /// Create a new analysis request
    pub fn new(source_url: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            target_language: target_language.into(),
        }
    }
}

/// A grounding source returned alongside a generated transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCitation {
    pub uri: String,
    pub title: String,
}

impl SourceCitation {
    /// Create a citation, falling back to a placeholder title when the
    /// source has none
    pub fn new(uri: impl Into<String>, title: Option<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNTITLED_SOURCE.to_string()),
        }
    }
}

/// The product of a successful analysis run.
/// Created atomically on full pipeline success and replaced wholesale
/// by the next successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    /// The working transcript (translated when a translation pass ran)
    pub transcript: String,
    /// Summary of the transcript in the target language
    pub summary: String,
    /// Grounding sources behind the transcript
    pub citations: Vec<SourceCitation>,
}

/// A single question/answer exchange against the current summary.
/// `answer` is `None` while the answer is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaExchange {
    pub question: String,
    pub answer: Option<String>,
}

/// A failed analysis run, recording where the pipeline stopped.
/// `stage` is `Idle` when the request was rejected before any stage ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisFailure {
    pub stage: Stage,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citation_keeps_title() {
        let citation = SourceCitation::new("https://example.com", Some("Example".to_string()));
        assert_eq!(citation.title, "Example");
        assert_eq!(citation.uri, "https://example.com");
    }

    #[test]
    fn citation_missing_title_gets_placeholder() {
        let citation = SourceCitation::new("https://example.com", None);
        assert_eq!(citation.title, UNTITLED_SOURCE);
    }

    #[test]
    fn citation_blank_title_gets_placeholder() {
        let citation = SourceCitation::new("https://example.com", Some("   ".to_string()));
        assert_eq!(citation.title, UNTITLED_SOURCE);
    }

    #[test]
    fn request_construction() {
        let request = AnalysisRequest::new("https://youtube.com/watch?v=abc", "es");
        assert_eq!(request.source_url, "https://youtube.com/watch?v=abc");
        assert_eq!(request.target_language, "es");
    }
}
