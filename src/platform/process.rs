//! Subprocess helpers shared by the platform implementations

use crate::core::error::{PilotError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A program plus arguments, built before anything is spawned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }

    /// Run to completion; a non-zero exit is an error
    pub fn run(&self) -> Result<()> {
        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| PilotError::Collaborator(format!("{} failed: {}", self.program, e)))?;
        if output.status.success() {
            Ok(())
        } else {
            Err(PilotError::Collaborator(format!(
                "{} failed: {}",
                self.program,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    /// Start without waiting
    pub fn spawn(&self) -> Result<()> {
        self.command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| PilotError::Launch(format!("{}: {}", self.program, e)))
    }
}

/// Spawn an executable path directly
pub fn spawn_path(path: &Path) -> Result<()> {
    Command::new(path)
        .stdin(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| PilotError::Launch(format!("{}: {}", path.display(), e)))
}

/// Run shell text through `shell flag text`, inheriting stdout and stderr
///
/// Only spawn failures are errors; a failing command is logged.
pub fn run_shell_with(shell: &str, flag: &str, text: &str) -> Result<()> {
    tracing::warn!(command = %text, "executing unsandboxed shell command");
    let status = Command::new(shell)
        .args([OsStr::new(flag), OsStr::new(text)])
        .stdin(Stdio::null())
        .status()
        .map_err(|e| PilotError::Collaborator(format!("{} failed: {}", shell, e)))?;
    if !status.success() {
        tracing::warn!(command = %text, ?status, "shell command exited unsuccessfully");
    }
    Ok(())
}

/// First path that exists on disk
pub fn first_existing(candidates: &[PathBuf]) -> Option<&PathBuf> {
    candidates.iter().find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_collects_args() {
        let spec = CommandSpec::new("xdotool", ["key", "--repeat", "5"]);
        assert_eq!(spec.program, "xdotool");
        assert_eq!(spec.args, vec!["key", "--repeat", "5"]);
    }

    #[test]
    fn test_missing_program_is_error() {
        let spec = CommandSpec::new("definitely-not-a-real-program-4821", Vec::<String>::new());
        assert!(spec.run().is_err());
        assert!(matches!(spec.spawn(), Err(PilotError::Launch(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_command_does_not_read_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("read");
        let script = format!("if read line; then touch '{}'; fi", marker.display());
        run_shell_with("sh", "-c", &script).unwrap();
        assert!(!marker.exists());
    }

    #[test]
    fn test_first_existing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("code");
        std::fs::write(&present, "").unwrap();
        let candidates = vec![dir.path().join("missing"), present.clone()];
        assert_eq!(first_existing(&candidates), Some(&present));
        assert_eq!(first_existing(&candidates[..1]), None);
    }
}
