//! Analysis pipeline integration tests
//!
//! Drives the analysis session end-to-end over a scripted gateway that
//! returns canned responses and records every call.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use podcast_analyzer::application::ports::{AiGateway, GatewayError, GeneratedTranscript};
use podcast_analyzer::application::{AnalysisCallbacks, AnalysisSession};
use podcast_analyzer::domain::analysis::{AnalysisRequest, SourceCitation, Stage};

/// Canned gateway. Cloning shares the call log, so tests can keep a
/// handle after moving a clone into the session.
#[derive(Clone, Default)]
struct ScriptedGateway {
    calls: Arc<Mutex<Vec<String>>>,
    citations: Vec<SourceCitation>,
    fail_transcript: bool,
    fail_answer: bool,
}

impl ScriptedGateway {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiGateway for ScriptedGateway {
    async fn generate_transcript(
        &self,
        source_url: &str,
    ) -> Result<GeneratedTranscript, GatewayError> {
        self.record(format!("generate_transcript({source_url})"));
        if self.fail_transcript {
            return Err(GatewayError::ApiError(
                "search backend unavailable".to_string(),
            ));
        }
        Ok(GeneratedTranscript {
            text: "Hello world.".to_string(),
            citations: self.citations.clone(),
        })
    }

    async fn translate(&self, text: &str, language: &str) -> Result<String, GatewayError> {
        self.record(format!("translate({text}, {language})"));
        Ok(match (text, language) {
            ("Hello world.", "Spanish") => "Hola mundo.".to_string(),
            _ => format!("{text} [{language}]"),
        })
    }

    async fn summarize(&self, text: &str, language: &str) -> Result<String, GatewayError> {
        self.record(format!("summarize({text}, {language})"));
        Ok(match (text, language) {
            ("Hello world.", "English") => "A greeting.".to_string(),
            ("Hola mundo.", "Spanish") => "Un saludo.".to_string(),
            _ => format!("summary of {text}"),
        })
    }

    async fn answer(
        &self,
        context: &str,
        question: &str,
        language: &str,
    ) -> Result<String, GatewayError> {
        self.record(format!("answer({context}, {question}, {language})"));
        if self.fail_answer {
            return Err(GatewayError::ApiError("model offline".to_string()));
        }
        Ok("English.".to_string())
    }
}

fn session(gateway: ScriptedGateway) -> AnalysisSession<ScriptedGateway> {
    AnalysisSession::with_stage_dwell(gateway, Duration::ZERO)
}

fn recording_callbacks(stages: &Arc<Mutex<Vec<Stage>>>) -> AnalysisCallbacks {
    let stages = Arc::clone(stages);
    AnalysisCallbacks {
        on_stage: Some(Box::new(move |stage| {
            stages.lock().unwrap().push(stage);
        })),
    }
}

#[tokio::test]
async fn english_analysis_keeps_raw_transcript() {
    let gateway = ScriptedGateway::default();
    let session = session(gateway.clone());
    let stages = Arc::new(Mutex::new(Vec::new()));

    session
        .run_analysis(
            AnalysisRequest::new("https://youtube.com/watch?v=abc", "en"),
            recording_callbacks(&stages),
        )
        .await;

    let report = session.report().expect("analysis should succeed");
    assert_eq!(report.transcript, "Hello world.");
    assert_eq!(report.summary, "A greeting.");
    assert!(report.citations.is_empty());
    assert!(session.failure().is_none());
    assert!(session.stage().is_idle());

    assert_eq!(
        gateway.calls(),
        vec![
            "generate_transcript(https://youtube.com/watch?v=abc)",
            "summarize(Hello world., English)",
        ]
    );

    let visited = stages.lock().unwrap().clone();
    assert_eq!(
        visited,
        vec![
            Stage::DownloadingAudio,
            Stage::AnalyzingContent,
            Stage::GeneratingTranscript,
            Stage::Summarizing,
            Stage::Idle,
        ]
    );
}

#[tokio::test]
async fn spanish_analysis_translates_then_summarizes() {
    let gateway = ScriptedGateway::default();
    let session = session(gateway.clone());
    let stages = Arc::new(Mutex::new(Vec::new()));

    session
        .run_analysis(
            AnalysisRequest::new("https://youtube.com/watch?v=abc", "es"),
            recording_callbacks(&stages),
        )
        .await;

    let report = session.report().expect("analysis should succeed");
    assert_eq!(report.transcript, "Hola mundo.");
    assert_eq!(report.summary, "Un saludo.");

    assert_eq!(
        gateway.calls(),
        vec![
            "generate_transcript(https://youtube.com/watch?v=abc)",
            "translate(Hello world., Spanish)",
            "summarize(Hola mundo., Spanish)",
        ]
    );

    let visited = stages.lock().unwrap().clone();
    assert_eq!(
        visited.iter().filter(|s| **s == Stage::Translating).count(),
        1
    );
}

#[tokio::test]
async fn citations_survive_into_the_report() {
    let session = session(ScriptedGateway {
        citations: vec![
            SourceCitation::new("https://example.com/a", Some("Example".to_string())),
            SourceCitation::new("https://example.com/b", None),
        ],
        ..Default::default()
    });

    session
        .run_analysis(
            AnalysisRequest::new("https://youtube.com/watch?v=abc", "en"),
            AnalysisCallbacks::default(),
        )
        .await;

    let report = session.report().expect("analysis should succeed");
    assert_eq!(report.citations.len(), 2);
    assert_eq!(report.citations[0].title, "Example");
    assert_eq!(report.citations[1].title, "Untitled Source");
}

#[tokio::test]
async fn transcript_failure_leaves_failure_only() {
    let session = session(ScriptedGateway {
        fail_transcript: true,
        ..Default::default()
    });

    session
        .run_analysis(
            AnalysisRequest::new("https://youtube.com/watch?v=abc", "en"),
            AnalysisCallbacks::default(),
        )
        .await;

    let failure = session.failure().expect("failure should be recorded");
    assert_eq!(failure.stage, Stage::GeneratingTranscript);
    assert!(failure.message.contains("Failed to analyze video."));
    assert!(failure.message.contains("search backend unavailable"));
    assert!(session.report().is_none());
    assert!(session.stage().is_idle());
}

#[tokio::test]
async fn question_is_answered_from_the_summary() {
    let gateway = ScriptedGateway::default();
    let session = session(gateway.clone());

    session
        .run_analysis(
            AnalysisRequest::new("https://youtube.com/watch?v=abc", "en"),
            AnalysisCallbacks::default(),
        )
        .await;
    session.ask_question("What language?").await;

    let qa = session.qa().expect("exchange should exist");
    assert_eq!(qa.question, "What language?");
    assert_eq!(qa.answer.as_deref(), Some("English."));
    assert!(!session.is_asking());

    // The answer call received the stored summary as its context.
    assert!(gateway
        .calls()
        .contains(&"answer(A greeting., What language?, English)".to_string()));
}

#[tokio::test]
async fn question_failure_is_surfaced_inline() {
    let session = session(ScriptedGateway {
        fail_answer: true,
        ..Default::default()
    });

    session
        .run_analysis(
            AnalysisRequest::new("https://youtube.com/watch?v=abc", "en"),
            AnalysisCallbacks::default(),
        )
        .await;
    session.ask_question("What language?").await;

    let answer = session.qa().unwrap().answer.unwrap();
    assert!(answer.starts_with("Sorry, I couldn't get an answer."));
    assert!(answer.contains("model offline"));
    assert!(session.failure().is_none());
}

#[tokio::test]
async fn rerun_supersedes_previous_outputs() {
    let gateway = ScriptedGateway::default();
    let session = session(gateway.clone());
    let request = AnalysisRequest::new("https://youtube.com/watch?v=abc", "en");

    session
        .run_analysis(request.clone(), AnalysisCallbacks::default())
        .await;
    session.ask_question("What language?").await;
    assert!(session.qa().is_some());

    session
        .run_analysis(request, AnalysisCallbacks::default())
        .await;

    assert!(session.qa().is_none());
    assert!(session.failure().is_none());
    assert!(session.report().is_some());
}
