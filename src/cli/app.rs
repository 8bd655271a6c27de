//! Main app runner for the analyze flow

use std::env;
use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use crate::application::ports::{AiGateway, ConfigStore};
use crate::application::{AnalysisCallbacks, AnalysisSession};
use crate::domain::analysis::{AnalysisRequest, Stage};
use crate::domain::config::AppConfig;
use crate::infrastructure::{GeminiGateway, XdgConfigStore};

use super::args::AnalyzeOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run a full analysis and the follow-up question flow
pub async fn run_analyze(options: AnalyzeOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    // Load API key from config or environment
    let api_key = match get_api_key().await {
        Ok(key) => key,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let gateway = GeminiGateway::with_model(api_key, &options.model);
    let session = AnalysisSession::new(gateway);

    presenter.start_spinner("Starting analysis...");
    let callbacks = AnalysisCallbacks {
        on_stage: presenter.spinner_handle().map(|spinner| {
            Box::new(move |stage: Stage| {
                if !stage.is_idle() {
                    spinner.set_message(stage.label());
                }
            }) as Box<dyn Fn(Stage) + Send + Sync>
        }),
    };

    let request = AnalysisRequest::new(&options.url, &options.language);
    session.run_analysis(request, callbacks).await;

    if let Some(failure) = session.failure() {
        presenter.spinner_fail("Analysis failed");
        presenter.error(&failure.message);
        return ExitCode::from(EXIT_ERROR);
    }

    let Some(report) = session.report() else {
        presenter.spinner_fail("Analysis failed");
        return ExitCode::from(EXIT_ERROR);
    };

    presenter.spinner_success("Analysis complete");

    presenter.section("AI Summary");
    presenter.output(&report.summary);

    if options.show_sources && !report.citations.is_empty() {
        presenter.section("Sources");
        for citation in &report.citations {
            presenter.source(&citation.title, &citation.uri);
        }
    }

    if options.show_transcript {
        presenter.section("Full Transcript");
        presenter.output(&report.transcript);
    }

    for question in &options.questions {
        ask_and_print(&session, &presenter, question).await;
    }

    if options.interactive && options.questions.is_empty() && io::stdin().is_terminal() {
        run_question_loop(&session, &presenter).await;
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Ask one question and print its answer
async fn ask_and_print<G: AiGateway>(
    session: &AnalysisSession<G>,
    presenter: &Presenter,
    question: &str,
) {
    let question = question.trim();
    if question.is_empty() {
        return;
    }

    presenter.section(&format!("Q: {}", question));
    session.ask_question(question).await;

    // The session always leaves a displayable answer, success or failure.
    if let Some(answer) = session.qa().and_then(|qa| qa.answer) {
        presenter.output(&answer);
    }
}

/// Read questions from the terminal until an empty line or EOF
async fn run_question_loop<G: AiGateway>(session: &AnalysisSession<G>, presenter: &Presenter) {
    presenter.info("Ask a question about the video (empty line to quit)");
    let stdin = io::stdin();

    loop {
        presenter.output_inline("? ");
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let question = line.trim();
        if question.is_empty() {
            break;
        }

        session.ask_question(question).await;
        if let Some(answer) = session.qa().and_then(|qa| qa.answer) {
            presenter.output(&answer);
        }
    }
}

/// Get API key from environment or config file
pub async fn get_api_key() -> Result<String, String> {
    // Check environment first
    if let Ok(key) = env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    // Check config file
    let store = XdgConfigStore::new();
    let config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    config.api_key.ok_or_else(|| {
        "Missing API key. Set GEMINI_API_KEY environment variable or run 'podcast-analyzer config set api_key <key>'".to_string()
    })
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        api_key: env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
