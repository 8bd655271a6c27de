//! Analysis pipeline stage value object

use std::fmt;

/// Progress stages of an analysis run, in pipeline order.
///
/// Exactly one stage is current at any time; `Translating` is skipped
/// when the target language is the default. The session resets the
/// stage to `Idle` at the start and end of every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    #[default]
    Idle,
    DownloadingAudio,
    AnalyzingContent,
    GeneratingTranscript,
    Translating,
    Summarizing,
}

impl Stage {
    /// Get the progress label shown to the user while this stage is active
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::DownloadingAudio => "Downloading Audio...",
            Self::AnalyzingContent => "Analyzing Content...",
            Self::GeneratingTranscript => "Researching & Generating Transcript...",
            Self::Translating => "Translating...",
            Self::Summarizing => "Summarizing...",
        }
    }

    /// Get the string identifier for this stage
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::DownloadingAudio => "downloading-audio",
            Self::AnalyzingContent => "analyzing-content",
            Self::GeneratingTranscript => "generating-transcript",
            Self::Translating => "translating",
            Self::Summarizing => "summarizing",
        }
    }

    /// Check whether no run is active
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
