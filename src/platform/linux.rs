//! Linux and other Unixes: direct process spawn, no fallback search

use crate::core::error::{PilotError, Result};
use crate::platform::process::{first_existing, run_shell_with, spawn_path, CommandSpec};
use crate::platform::{Editor, Platform, PlatformFamily};
use std::path::{Path, PathBuf};

fn vscode_binaries() -> Vec<PathBuf> {
    ["/usr/bin/code", "/usr/local/bin/code", "/snap/bin/code"]
        .into_iter()
        .map(PathBuf::from)
        .collect()
}

pub struct LinuxPlatform;

impl Platform for LinuxPlatform {
    fn family(&self) -> PlatformFamily {
        PlatformFamily::Linux
    }

    fn launch(&self, app: &str) -> Result<()> {
        CommandSpec::new(app, Vec::<String>::new()).spawn()
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
        if let Some(code) = first_existing(&vscode_binaries()) {
            let code = code.to_string_lossy().into_owned();
            if CommandSpec::new(&code, [file.as_str()]).spawn().is_ok() {
                return Ok(Editor::VsCode);
            }
        }
        CommandSpec::new("xdg-open", [file.as_str()]).spawn()?;
        Ok(Editor::SystemViewer)
    }
}
