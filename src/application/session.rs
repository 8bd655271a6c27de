//! Video analysis session use case
//!
//! Sequences the gateway calls of one analysis run, tracks the staged
//! progress shown to the user, and answers follow-up questions against
//! the last successful summary. Each user session owns one instance.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::domain::analysis::{
    AnalysisFailure, AnalysisReport, AnalysisRequest, QaExchange, Stage,
};
use crate::domain::language;

use super::ports::{AiGateway, GatewayError};

/// Dwell time for the two warmup stages shown before the first network call
const STAGE_DWELL: Duration = Duration::from_secs(1);

/// Callbacks for stage transitions during an analysis run
#[derive(Default)]
pub struct AnalysisCallbacks {
    /// Called whenever the session enters a new stage, including the
    /// final return to [`Stage::Idle`]
    pub on_stage: Option<Box<dyn Fn(Stage) + Send + Sync>>,
}

/// Mutable per-session outputs.
/// Superseded wholesale by every new run.
#[derive(Default)]
struct SessionState {
    report: Option<AnalysisReport>,
    failure: Option<AnalysisFailure>,
    qa: Option<QaExchange>,
    language_name: Option<String>,
}

/// A gateway failure tagged with the stage it interrupted
struct StageError {
    stage: Stage,
    source: GatewayError,
}

/// One user session: drives the staged analysis pipeline and the
/// follow-up question flow, and owns all state either produces.
///
/// Both flows are serialized with respect to themselves: a second
/// `run_analysis` while one is in progress is a no-op, as is a second
/// `ask_question` while an answer is pending. A new run invalidates
/// everything the previous one produced, including any in-flight
/// question about the superseded summary.
pub struct AnalysisSession<G: AiGateway> {
    gateway: G,
    stage: Mutex<Stage>,
    state: Mutex<SessionState>,
    analyzing: AtomicBool,
    asking: AtomicBool,
    stage_dwell: Duration,
}

impl<G: AiGateway> AnalysisSession<G> {
    /// Create a new session over the given gateway
    pub fn new(gateway: G) -> Self {
        Self::with_stage_dwell(gateway, STAGE_DWELL)
    }

    /// Create a session with a custom dwell for the warmup stages
    pub fn with_stage_dwell(gateway: G, stage_dwell: Duration) -> Self {
        Self {
            gateway,
            stage: Mutex::new(Stage::Idle),
            state: Mutex::new(SessionState::default()),
            analyzing: AtomicBool::new(false),
            asking: AtomicBool::new(false),
            stage_dwell,
        }
    }

    /// Current pipeline stage, `Idle` when no run is active
    pub fn stage(&self) -> Stage {
        *self.stage.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether an analysis run is in progress
    pub fn is_analyzing(&self) -> bool {
        self.analyzing.load(Ordering::SeqCst)
    }

    /// Whether a question is being answered
    pub fn is_asking(&self) -> bool {
        self.asking.load(Ordering::SeqCst)
    }

    /// Report of the last successful run, if any
    pub fn report(&self) -> Option<AnalysisReport> {
        self.lock_state().report.clone()
    }

    /// Failure of the last run or rejected submission, if any
    pub fn failure(&self) -> Option<AnalysisFailure> {
        self.lock_state().failure.clone()
    }

    /// The live question/answer exchange, if any
    pub fn qa(&self) -> Option<QaExchange> {
        self.lock_state().qa.clone()
    }

    /// Run the full analysis pipeline for `request`.
    ///
    /// All outcomes land in the session state: a report on success, a
    /// failure otherwise, never both. The stage always returns to
    /// `Idle` on exit. A call while a run is already in progress is a
    /// no-op.
    pub async fn run_analysis(&self, request: AnalysisRequest, callbacks: AnalysisCallbacks) {
        if self
            .analyzing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        if request.source_url.trim().is_empty() {
            // Rejected before any gateway call; previous results stay visible.
            self.lock_state().failure = Some(AnalysisFailure {
                stage: Stage::Idle,
                message: "Please enter a valid YouTube URL.".to_string(),
            });
            self.analyzing.store(false, Ordering::SeqCst);
            return;
        }

        // A new run supersedes everything the previous one produced,
        // including any in-flight answer to a question about it.
        {
            let mut state = self.lock_state();
            state.report = None;
            state.failure = None;
            state.qa = None;
        }

        let outcome = self.run_stages(&request, &callbacks).await;
        self.set_stage(Stage::Idle, &callbacks);

        if let Err(failed) = outcome {
            self.lock_state().failure = Some(AnalysisFailure {
                stage: failed.stage,
                message: format!("Failed to analyze video. {}", failed.source),
            });
        }
        self.analyzing.store(false, Ordering::SeqCst);
    }

    async fn run_stages(
        &self,
        request: &AnalysisRequest,
        callbacks: &AnalysisCallbacks,
    ) -> Result<(), StageError> {
        // Warmup stages give the user a sense of progress before the
        // first network call; they perform no I/O.
        self.set_stage(Stage::DownloadingAudio, callbacks);
        tokio::time::sleep(self.stage_dwell).await;
        self.set_stage(Stage::AnalyzingContent, callbacks);
        tokio::time::sleep(self.stage_dwell).await;

        self.set_stage(Stage::GeneratingTranscript, callbacks);
        let generated = self
            .gateway
            .generate_transcript(&request.source_url)
            .await
            .map_err(|source| StageError {
                stage: Stage::GeneratingTranscript,
                source,
            })?;

        let target = language::find(&request.target_language);
        let language_name = target.map(|l| l.name).unwrap_or(language::FALLBACK_NAME);

        // Translation runs only for a recognized non-default language;
        // an unknown code skips the pass rather than failing the run.
        let mut transcript = generated.text;
        if target.is_some_and(|l| l.code != language::DEFAULT_CODE) {
            self.set_stage(Stage::Translating, callbacks);
            transcript = self
                .gateway
                .translate(&transcript, language_name)
                .await
                .map_err(|source| StageError {
                    stage: Stage::Translating,
                    source,
                })?;
        }

        self.set_stage(Stage::Summarizing, callbacks);
        let summary = self
            .gateway
            .summarize(&transcript, language_name)
            .await
            .map_err(|source| StageError {
                stage: Stage::Summarizing,
                source,
            })?;

        let mut state = self.lock_state();
        state.report = Some(AnalysisReport {
            transcript,
            summary,
            citations: generated.citations,
        });
        state.language_name = Some(language_name.to_string());
        Ok(())
    }

    /// Answer `question` against the last successful summary.
    ///
    /// A no-op when the question is blank, when no summary exists yet,
    /// or while a previous question is still in flight. A gateway
    /// failure is folded into the answer text; this flow always leaves
    /// a displayable answer behind.
    pub async fn ask_question(&self, question: &str) {
        let question = question.trim();
        if question.is_empty() {
            return;
        }

        let (summary, language_name) = {
            let state = self.lock_state();
            match &state.report {
                Some(report) => (
                    report.summary.clone(),
                    state
                        .language_name
                        .clone()
                        .unwrap_or_else(|| language::FALLBACK_NAME.to_string()),
                ),
                None => return,
            }
        };

        if self
            .asking
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        self.lock_state().qa = Some(QaExchange {
            question: question.to_string(),
            answer: None,
        });

        let answer = match self.gateway.answer(&summary, question, &language_name).await {
            Ok(text) => text,
            Err(e) => format!("Sorry, I couldn't get an answer. {}", e),
        };

        // A run that started meanwhile cleared the exchange; its answer
        // would reference a superseded summary, so it is dropped.
        if let Some(qa) = self.lock_state().qa.as_mut() {
            qa.answer = Some(answer);
        }
        self.asking.store(false, Ordering::SeqCst);
    }

    fn set_stage(&self, stage: Stage, callbacks: &AnalysisCallbacks) {
        *self.stage.lock().unwrap_or_else(|e| e.into_inner()) = stage;
        if let Some(on_stage) = &callbacks.on_stage {
            on_stage(stage);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
