//! PodcastAnalyzer CLI entry point

use std::process::ExitCode;

use clap::Parser;

use podcast_analyzer::cli::{
    app::{load_merged_config, run_analyze, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    AnalyzeOptions,
};
use podcast_analyzer::domain::config::AppConfig;
use podcast_analyzer::domain::language;
use podcast_analyzer::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Languages) => {
            for lang in language::LANGUAGES {
                presenter.key_value(lang.code, lang.name);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let Some(url) = cli.url else {
        presenter.error("Missing video URL. Usage: podcast-analyzer <URL> [--language CODE]");
        return ExitCode::from(EXIT_USAGE_ERROR);
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        api_key: None, // API key comes from env/file only
        model: cli.model,
        language: cli.language,
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let options = AnalyzeOptions {
        url,
        language: config.language_or_default(),
        model: config.model_or_default(),
        show_transcript: cli.transcript,
        show_sources: cli.sources,
        questions: cli.questions,
        interactive: !cli.no_prompt,
    };

    run_analyze(options).await
}
