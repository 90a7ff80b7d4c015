//! Intent dispatch - routes each intent to exactly one handler
//!
//! Stateless: every call stands alone. Every intent kind, including unknown
//! and unrecognized tags, has a handler, and every handler speaks exactly one
//! confirmation or complaint (write_code also announces that it started).
//! Missing parameters are soft failures; collaborator errors are returned to
//! the caller.

use crate::codegen::{timestamped_name, unix_now, CodeWorkflow, GeneratedCode};
use crate::command::resolver::{AppResolver, AppTarget, LaunchOutcome};
use crate::core::config::ActionConfig;
use crate::core::error::{PilotError, Result};
use crate::core::types::{Intent, IntentKind};
use crate::llm::client::Inference;
use crate::platform::Platform;
use crate::services::{Desktop, Key, Speaker};
use std::path::PathBuf;

const APP_KEYS: [&str; 3] = ["app", "name", "application"];
const COMMAND_KEYS: [&str; 2] = ["cmd", "command"];

/// What a dispatch did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Launched(AppTarget),
    NotFound(String),
    LaunchFailed(String),
    Closed(String),
    CloseFailed(String),
    Screenshot(PathBuf),
    Volume(Key),
    Typed,
    CommandRun(String),
    CodeWritten(GeneratedCode),
    CodeFailed,
    /// Required parameter absent; nothing was done
    MissingParameter(&'static str),
    Unsupported(String),
    NotUnderstood(IntentKind),
}

/// Borrowed view over the collaborators a dispatch needs
pub struct Dispatcher<'a> {
    speaker: &'a dyn Speaker,
    inference: &'a dyn Inference,
    desktop: &'a dyn Desktop,
    platform: &'a dyn Platform,
    actions: &'a ActionConfig,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        speaker: &'a dyn Speaker,
        inference: &'a dyn Inference,
        desktop: &'a dyn Desktop,
        platform: &'a dyn Platform,
        actions: &'a ActionConfig,
    ) -> Self {
        Self {
            speaker,
            inference,
            desktop,
            platform,
            actions,
        }
    }

    /// Perform the side effect for `intent`
    pub fn dispatch(&self, intent: &Intent) -> Result<DispatchOutcome> {
        tracing::info!(intent = %intent.kind, params = ?intent.params, "dispatch");
        let outcome = match &intent.kind {
            IntentKind::OpenApp => self.open_app(intent),
            IntentKind::CloseApp => self.close_app(intent),
            IntentKind::Screenshot => self.screenshot()?,
            IntentKind::VolumeUp => self.volume(Key::VolumeUp)?,
            IntentKind::VolumeDown => self.volume(Key::VolumeDown)?,
            IntentKind::TypeText => self.type_text(intent)?,
            IntentKind::RunCommand => self.run_command(intent)?,
            IntentKind::WriteCode => self.write_code(intent)?,
            IntentKind::Unknown | IntentKind::Other(_) => {
                self.speaker.speak("I didn't understand that intent.");
                DispatchOutcome::NotUnderstood(intent.kind.clone())
            }
        };
        tracing::debug!(?outcome, "dispatch complete");
        Ok(outcome)
    }

    fn missing(&self, param: &'static str, complaint: &str) -> DispatchOutcome {
        tracing::info!(param, "missing parameter");
        self.speaker.speak(complaint);
        DispatchOutcome::MissingParameter(param)
    }

    fn open_app(&self, intent: &Intent) -> DispatchOutcome {
        let Some(app) = intent.params.first_of(&APP_KEYS) else {
            return self.missing("app", "I didn't catch the app name.");
        };
        let app = app.trim().to_lowercase();

        match AppResolver::new(self.platform).resolve_and_launch(&app) {
            LaunchOutcome::Launched(target) => {
                self.speaker.speak(&format!("Opening {}", app));
                DispatchOutcome::Launched(target)
            }
            LaunchOutcome::NotFound => {
                self.speaker.speak(&format!("Sorry, I couldn't find {}.", app));
                DispatchOutcome::NotFound(app)
            }
            LaunchOutcome::Error(e) => {
                tracing::warn!(app = %app, error = %e, "could not open app");
                self.speaker.speak(&format!("Sorry, I couldn't open {}.", app));
                DispatchOutcome::LaunchFailed(app)
            }
        }
    }

    fn close_app(&self, intent: &Intent) -> DispatchOutcome {
        let Some(app) = intent.params.first_of(&APP_KEYS) else {
            return self.missing("app", "I didn't catch the app name.");
        };
        let app = app.trim().to_string();

        match self.platform.terminate(&app) {
            Ok(()) => {
                self.speaker.speak(&format!("Closed {}", app));
                DispatchOutcome::Closed(app)
            }
            Err(PilotError::Unsupported(what)) => {
                self.speaker.speak("Close app not supported on this OS yet.");
                DispatchOutcome::Unsupported(what)
            }
            Err(e) => {
                tracing::warn!(app = %app, error = %e, "could not close app");
                self.speaker.speak(&format!("Sorry, I couldn't close {}.", app));
                DispatchOutcome::CloseFailed(app)
            }
        }
    }

    fn screenshot(&self) -> Result<DispatchOutcome> {
        let filename = timestamped_name("screenshot", "png", unix_now());
        let path = self.actions.output_dir.join(filename);
        self.desktop.screenshot(&path)?;
        tracing::info!(path = %path.display(), "screenshot saved");
        self.speaker.speak("Screenshot taken.");
        Ok(DispatchOutcome::Screenshot(path))
    }

    fn volume(&self, key: Key) -> Result<DispatchOutcome> {
        self.desktop.press_key(key, self.actions.volume_steps)?;
        self.speaker.speak(match key {
            Key::VolumeUp => "Volume increased.",
            Key::VolumeDown => "Volume decreased.",
        });
        Ok(DispatchOutcome::Volume(key))
    }

    fn type_text(&self, intent: &Intent) -> Result<DispatchOutcome> {
        let Some(text) = intent.params.get("text") else {
            return Ok(self.missing("text", "I didn't catch what to type."));
        };
        self.desktop.type_text(text)?;
        self.speaker.speak("Typed your text.");
        Ok(DispatchOutcome::Typed)
    }

    fn run_command(&self, intent: &Intent) -> Result<DispatchOutcome> {
        let Some(cmd) = intent.params.first_of(&COMMAND_KEYS) else {
            return Ok(self.missing("cmd", "I didn't catch the command to run."));
        };
        self.platform.run_shell(cmd)?;
        self.speaker.speak(&format!("Running command {}", cmd));
        Ok(DispatchOutcome::CommandRun(cmd.to_string()))
    }

    fn write_code(&self, intent: &Intent) -> Result<DispatchOutcome> {
        let Some(description) = intent.params.get("description") else {
            return Ok(self.missing("description", "Please tell me what code to write."));
        };

        self.speaker
            .speak(&format!("Generating code for {}", description));

        let workflow = CodeWorkflow::new(self.inference, self.platform, &self.actions.output_dir);
        match workflow.generate_and_persist(description, unix_now())? {
            Some(generated) => {
                match generated.editor {
                    Some(editor) => self
                        .speaker
                        .speak(&format!("Code saved and opened in {}.", editor)),
                    None => self
                        .speaker
                        .speak(&format!("Code saved as {}.", generated.artifact.filename)),
                }
                Ok(DispatchOutcome::CodeWritten(generated))
            }
            None => {
                self.speaker
                    .speak("Sorry, I couldn't generate the code right now.");
                Ok(DispatchOutcome::CodeFailed)
            }
        }
    }
}
