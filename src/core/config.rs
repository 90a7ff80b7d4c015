//! Assistant configuration
//!
//! Loaded once at startup from an optional TOML file, then overridden from the
//! environment. Every section has defaults, so an empty file (or no file at
//! all) gives a working local setup against an Ollama endpoint.

use crate::core::error::{PilotError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration for the assistant
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub llm: LlmConfig,
    pub session: SessionConfig,
    pub actions: ActionConfig,
    pub speech: SpeechConfig,
    pub search: SearchConfig,
}

/// Inference service settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Endpoint URL; the wire format is detected from it
    pub api_url: String,
    pub model: String,
    /// Required for Anthropic and OpenAI-compatible endpoints, unused by Ollama
    pub api_key: Option<String>,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:11434/api/chat".into(),
            model: "llama3.2".into(),
            api_key: None,
            max_tokens: 4096,
        }
    }
}

/// Session loop settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Any utterance containing one of these (case-insensitive) ends the loop
    pub termination_phrases: Vec<String>,
    pub greeting: String,
    pub farewell: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            termination_phrases: vec!["goodbye".into(), "exit".into()],
            greeting: "Voice coding assistant ready.".into(),
            farewell: "Goodbye.".into(),
        }
    }
}

/// Side-effect settings for the dispatcher
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Key presses per volume_up / volume_down
    pub volume_steps: u32,
    /// Where generated code and screenshots are written
    pub output_dir: PathBuf,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            volume_steps: 5,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Speech output settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// External TTS program, called with the text as its last argument
    pub command: Option<String>,
    pub args: Vec<String>,
}

/// Fallback search settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Replaces the platform's well-known installation directories when set
    pub roots: Option<Vec<PathBuf>>,
}

impl AssistantConfig {
    /// Load from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    PilotError::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::from_toml(&contents)?
            }
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| PilotError::Config(format!("Failed to parse config TOML: {}", e)))
    }

    /// Apply LLM_API_URL / LLM_MODEL / LLM_API_KEY overrides
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("LLM_API_URL") {
            self.llm.api_url = url;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            if !key.is_empty() {
                self.llm.api_key = Some(key);
            }
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.llm.model.trim().is_empty() {
            return Err(PilotError::Config("llm.model must not be empty".into()));
        }
        if self.llm.api_url.trim().is_empty() {
            return Err(PilotError::Config("llm.api_url must not be empty".into()));
        }
        if self
            .session
            .termination_phrases
            .iter()
            .all(|p| p.trim().is_empty())
        {
            return Err(PilotError::Config(
                "session.termination_phrases needs at least one phrase".into(),
            ));
        }
        if self.actions.volume_steps == 0 {
            return Err(PilotError::Config("actions.volume_steps must be > 0".into()));
        }
        Ok(())
    }
}
