//! Spoken feedback

use crate::core::config::SpeechConfig;
use crate::platform::process::CommandSpec;

/// Fire-and-forget speech output
pub trait Speaker {
    fn speak(&self, text: &str);
}

/// Prints every line; optionally pipes it to an external TTS program
pub struct ConsoleSpeaker {
    tts: Option<CommandSpec>,
}

impl ConsoleSpeaker {
    pub fn new() -> Self {
        Self { tts: None }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        let tts = config
            .command
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(|program| CommandSpec::new(program, config.args.iter().cloned()));
        Self { tts }
    }

    /// Command that would voice `text`, if a TTS program is configured
    pub fn tts_command(&self, text: &str) -> Option<CommandSpec> {
        self.tts.as_ref().map(|base| {
            let mut spec = base.clone();
            spec.args.push(text.to_string());
            spec
        })
    }
}

impl Default for ConsoleSpeaker {
    fn default() -> Self {
        Self::new()
    }
}

impl Speaker for ConsoleSpeaker {
    fn speak(&self, text: &str) {
        println!("assistant: {}", text);
        tracing::debug!(text, "speak");
        if let Some(spec) = self.tts_command(text) {
            if let Err(e) = spec.run() {
                tracing::warn!(error = %e, "speech synthesis failed");
            }
        }
    }
}
