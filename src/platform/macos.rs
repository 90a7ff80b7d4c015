//! macOS: app bundles via `open -a`, no fallback search, no termination

use crate::core::error::{PilotError, Result};
use crate::platform::process::{run_shell_with, spawn_path, CommandSpec};
use crate::platform::{Editor, Platform, PlatformFamily};
use std::path::{Path, PathBuf};

const VSCODE_BUNDLE: &str = "/Applications/Visual Studio Code.app";

pub struct MacPlatform;

impl MacPlatform {
    pub fn open_app_command(app: &str) -> CommandSpec {
        CommandSpec::new("open", ["-a", app])
    }
}

impl Platform for MacPlatform {
    fn family(&self) -> PlatformFamily {
        PlatformFamily::MacOs
    }

    fn launch(&self, app: &str) -> Result<()> {
        // `open` exits non-zero when no bundle matches
        Self::open_app_command(app)
            .run()
            .map_err(|e| PilotError::Launch(e.to_string()))
    }

    fn fallback_search(&self, _app: &str) -> Option<PathBuf> {
        None
    }

    fn launch_path(&self, path: &Path) -> Result<()> {
        spawn_path(path)
    }

    fn terminate(&self, app: &str) -> Result<()> {
        Err(PilotError::Unsupported(format!("closing {}", app)))
    }

    fn run_shell(&self, command: &str) -> Result<()> {
        run_shell_with("sh", "-c", command)
    }

    fn open_in_editor(&self, path: &Path) -> Result<Editor> {
        let file = path.to_string_lossy().into_owned();
        if Path::new(VSCODE_BUNDLE).exists()
            && CommandSpec::new("open", ["-a", "Visual Studio Code", file.as_str()])
                .spawn()
                .is_ok()
        {
            return Ok(Editor::VsCode);
        }
        CommandSpec::new("open", ["-t", file.as_str()]).spawn()?;
        Ok(Editor::TextEdit)
    }
}
