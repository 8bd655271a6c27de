//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::language;

/// Model identifier used when none is configured
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            model: Some(DEFAULT_MODEL.to_string()),
            language: Some(language::DEFAULT_CODE.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            model: other.model.or(self.model),
            language: other.language.or(self.language),
        }
    }

    /// Get the model identifier, or the default if not set
    pub fn model_or_default(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Get the target language code, or the default if not set
    pub fn language_or_default(&self) -> String {
        self.language
            .clone()
            .unwrap_or_else(|| language::DEFAULT_CODE.to_string())
    }
}
