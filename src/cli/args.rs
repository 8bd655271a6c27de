//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// PodcastAnalyzer - summarize and query any YouTube video
#[derive(Parser, Debug)]
#[command(name = "podcast-analyzer")]
#[command(version)]
#[command(about = "Turn any YouTube video into a summarized, queryable podcast using Google Gemini")]
#[command(long_about = None)]
pub struct Cli {
    /// URL of the video to analyze
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Target language code for the summary (see the `languages` subcommand)
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// Gemini model to use
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Print the full transcript after the summary
    #[arg(short, long)]
    pub transcript: bool,

    /// Print the grounding sources after the summary
    #[arg(short, long)]
    pub sources: bool,

    /// Ask a follow-up question after the analysis (repeatable)
    #[arg(short = 'q', long = "ask", value_name = "QUESTION")]
    pub questions: Vec<String>,

    /// Skip the interactive question prompt after the results
    #[arg(long)]
    pub no_prompt: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List the selectable target languages
    Languages,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed analysis options
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub url: String,
    pub language: String,
    pub model: String,
    pub show_transcript: bool,
    pub show_sources: bool,
    pub questions: Vec<String>,
    pub interactive: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["api_key", "model", "language"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
