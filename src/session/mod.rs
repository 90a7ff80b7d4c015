//! Session loop
//!
//! Listens, extracts, dispatches, repeats. One utterance is fully processed
//! before the next is captured. A failing cycle is logged and reported once,
//! then the loop carries on; only a termination phrase or an interrupt ends
//! it. The session owns its collaborators and drops them when `run` returns.

pub mod interrupt;

pub use interrupt::Interrupt;

use crate::command::{DispatchOutcome, Dispatcher};
use crate::core::config::{ActionConfig, SessionConfig};
use crate::core::error::Result;
use crate::core::types::Intent;
use crate::llm::client::Inference;
use crate::llm::parser::extract_intent;
use crate::platform::Platform;
use crate::services::{Desktop, ListenError, Listener, Speaker};

/// Collaborators used by every cycle
pub struct Services {
    pub speaker: Box<dyn Speaker>,
    pub inference: Box<dyn Inference>,
    pub desktop: Box<dyn Desktop>,
    pub platform: Box<dyn Platform>,
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TerminationPhrase,
    Interrupted,
}

/// Counters reported when the loop ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub cycles: usize,
    pub failures: usize,
    pub ended_by: EndReason,
}

pub struct Session {
    listener: Box<dyn Listener>,
    services: Services,
    config: SessionConfig,
    actions: ActionConfig,
    interrupt: Interrupt,
}

impl Session {
    pub fn new(
        listener: Box<dyn Listener>,
        services: Services,
        config: SessionConfig,
        actions: ActionConfig,
        interrupt: Interrupt,
    ) -> Self {
        Self {
            listener,
            services,
            config,
            actions,
            interrupt,
        }
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(
            self.services.speaker.as_ref(),
            self.services.inference.as_ref(),
            self.services.desktop.as_ref(),
            self.services.platform.as_ref(),
            &self.actions,
        )
    }

    fn extract(&self, utterance: &str) -> Intent {
        let intent = extract_intent(self.services.inference.as_ref(), utterance);
        tracing::info!(intent = %intent.kind, params = ?intent.params, "intent extracted");
        intent
    }

    /// Run one extract -> dispatch cycle without listening
    pub fn process(&self, utterance: &str) -> Result<DispatchOutcome> {
        let intent = self.extract(utterance);
        self.dispatcher().dispatch(&intent)
    }

    /// One reported cycle: failures are logged and spoken, never returned
    pub fn run_once(self, utterance: &str) -> Option<DispatchOutcome> {
        match self.process(utterance) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(error = %e, utterance = %utterance, "cycle failed");
                self.services.speaker.speak("Something went wrong.");
                None
            }
        }
    }

    /// Speak the greeting, then loop until a termination phrase or interrupt
    pub fn run(mut self) -> SessionSummary {
        self.services.speaker.speak(&self.config.greeting);
        let mut cycles = 0;
        let mut failures = 0;

        let ended_by = loop {
            if self.interrupt.is_raised() {
                break EndReason::Interrupted;
            }

            let utterance = match self.listener.capture_utterance() {
                Ok(text) => text,
                Err(ListenError::Interrupted) => break EndReason::Interrupted,
                Err(ListenError::Silence) => {
                    tracing::debug!("nothing heard");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "transcription failed");
                    continue;
                }
            };

            if is_termination(&utterance, &self.config.termination_phrases) {
                break EndReason::TerminationPhrase;
            }

            cycles += 1;
            let intent = self.extract(&utterance);
            if self.interrupt.is_raised() {
                break EndReason::Interrupted;
            }

            if let Err(e) = self.dispatcher().dispatch(&intent) {
                failures += 1;
                tracing::error!(error = %e, utterance = %utterance, "cycle failed");
                self.services.speaker.speak("Something went wrong.");
            }
        };

        self.services.speaker.speak(&self.config.farewell);
        tracing::info!(cycles, failures, ?ended_by, "session ended");
        SessionSummary {
            cycles,
            failures,
            ended_by,
        }
    }
}

/// True if `utterance` contains any non-blank phrase, case-insensitively
pub fn is_termination(utterance: &str, phrases: &[String]) -> bool {
    let lowered = utterance.to_lowercase();
    phrases
        .iter()
        .map(|p| p.trim().to_lowercase())
        .any(|p| !p.is_empty() && lowered.contains(&p))
}
