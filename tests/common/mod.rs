//! In-memory collaborators shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use voxpilot::core::error::{PilotError, Result};
use voxpilot::llm::client::Inference;
use voxpilot::platform::{Editor, Platform, PlatformFamily};
use voxpilot::services::{Desktop, Key, ListenError, Listener, Speaker};

/// Records every spoken line
#[derive(Clone, Default)]
pub struct RecordingSpeaker {
    pub lines: Rc<RefCell<Vec<String>>>,
}

impl RecordingSpeaker {
    pub fn spoken(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }
}

/// Replies from a queue; an exhausted queue behaves like an offline service
#[derive(Clone, Default)]
pub struct ScriptedInference {
    replies: Rc<RefCell<VecDeque<Result<String>>>>,
    pub prompts: Rc<RefCell<Vec<(String, String)>>>,
}

impl ScriptedInference {
    pub fn new<I: IntoIterator<Item = &'static str>>(replies: I) -> Self {
        let inference = Self::default();
        for reply in replies {
            inference.push_reply(reply);
        }
        inference
    }

    pub fn push_reply(&self, reply: &str) {
        self.replies.borrow_mut().push_back(Ok(reply.to_string()));
    }

    pub fn push_failure(&self) {
        self.replies
            .borrow_mut()
            .push_back(Err(PilotError::Inference("connection refused".into())));
    }
}

impl Inference for ScriptedInference {
    fn complete(&self, system: &str, user: &str) -> Result<String> {
        self.prompts
            .borrow_mut()
            .push((system.to_string(), user.to_string()));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(PilotError::Inference("no scripted reply".into())))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopCall {
    Press(Key, u32),
    Type(String),
    Screenshot(PathBuf),
}

/// Records calls; screenshots write an empty file so the path exists
#[derive(Clone, Default)]
pub struct RecordingDesktop {
    pub calls: Rc<RefCell<Vec<DesktopCall>>>,
    pub fail: bool,
}

impl RecordingDesktop {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<DesktopCall> {
        self.calls.borrow().clone()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            Err(PilotError::Collaborator("display unavailable".into()))
        } else {
            Ok(())
        }
    }
}

impl Desktop for RecordingDesktop {
    fn press_key(&self, key: Key, times: u32) -> Result<()> {
        self.check()?;
        self.calls.borrow_mut().push(DesktopCall::Press(key, times));
        Ok(())
    }

    fn type_text(&self, text: &str) -> Result<()> {
        self.check()?;
        self.calls
            .borrow_mut()
            .push(DesktopCall::Type(text.to_string()));
        Ok(())
    }

    fn screenshot(&self, path: &Path) -> Result<()> {
        self.check()?;
        fs::write(path, b"")?;
        self.calls
            .borrow_mut()
            .push(DesktopCall::Screenshot(path.to_path_buf()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Launch(String),
    Search(String),
    LaunchPath(PathBuf),
    Terminate(String),
    Shell(String),
    Editor(PathBuf),
}

/// Scripted platform: which steps succeed is configured per test
#[derive(Clone)]
pub struct ScriptedPlatform {
    pub family: PlatformFamily,
    pub installed: Vec<String>,
    pub searchable: Vec<(String, PathBuf)>,
    pub can_terminate: bool,
    pub editor: Option<Editor>,
    pub calls: Rc<RefCell<Vec<PlatformCall>>>,
}

impl ScriptedPlatform {
    /// A platform with nothing installed and no termination support
    pub fn bare(family: PlatformFamily) -> Self {
        Self {
            family,
            installed: Vec::new(),
            searchable: Vec::new(),
            can_terminate: family == PlatformFamily::Windows,
            editor: Some(Editor::VsCode),
            calls: Rc::default(),
        }
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Platform for ScriptedPlatform {
    fn family(&self) -> PlatformFamily {
        self.family
    }

    fn launch(&self, app: &str) -> Result<()> {
        self.record(PlatformCall::Launch(app.to_string()));
        if self.installed.iter().any(|a| a == app) {
            Ok(())
        } else {
            Err(PilotError::Launch(format!("{}: not found", app)))
        }
    }

    fn fallback_search(&self, app: &str) -> Option<PathBuf> {
        self.record(PlatformCall::Search(app.to_string()));
        self.searchable
            .iter()
            .find(|(name, _)| name == app)
            .map(|(_, path)| path.clone())
    }

    fn launch_path(&self, path: &Path) -> Result<()> {
        self.record(PlatformCall::LaunchPath(path.to_path_buf()));
        Ok(())
    }

    fn terminate(&self, app: &str) -> Result<()> {
        self.record(PlatformCall::Terminate(app.to_string()));
        if self.can_terminate {
            Ok(())
        } else {
            Err(PilotError::Unsupported(format!("closing {}", app)))
        }
    }

    fn run_shell(&self, command: &str) -> Result<()> {
        self.record(PlatformCall::Shell(command.to_string()));
        Ok(())
    }

    fn open_in_editor(&self, path: &Path) -> Result<Editor> {
        self.record(PlatformCall::Editor(path.to_path_buf()));
        self.editor
            .ok_or_else(|| PilotError::Launch("no editor available".into()))
    }
}

/// Yields scripted capture results, then reports an interrupt
pub struct ScriptedListener {
    script: VecDeque<std::result::Result<String, ListenError>>,
}

impl ScriptedListener {
    pub fn new(script: Vec<std::result::Result<String, ListenError>>) -> Self {
        Self {
            script: script.into(),
        }
    }

    pub fn lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| Ok(l.to_string())).collect())
    }
}

impl Listener for ScriptedListener {
    fn capture_utterance(&mut self) -> std::result::Result<String, ListenError> {
        self.script
            .pop_front()
            .unwrap_or(Err(ListenError::Interrupted))
    }
}
