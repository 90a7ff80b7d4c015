//! Windows: `start` launches, `taskkill` termination, Program Files search

use crate::core::error::{PilotError, Result};
use crate::platform::process::{first_existing, run_shell_with, spawn_path, CommandSpec};
use crate::platform::search::find_executable;
use crate::platform::{Editor, Platform, PlatformFamily};
use std::path::{Path, PathBuf};

const EXE_SUFFIX: &str = ".exe";

/// Characters `cmd` treats as command separators, redirections or escapes
const CMD_METACHARS: [char; 6] = ['&', '|', '<', '>', '^', '%'];

/// Well-known installation directories searched on launch failure
pub fn default_search_roots() -> Vec<PathBuf> {
    let mut roots = vec![
        PathBuf::from(r"C:\Program Files"),
        PathBuf::from(r"C:\Program Files (x86)"),
    ];
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        roots.push(PathBuf::from(local).join("Programs"));
    }
    roots
}

fn vscode_markers() -> Vec<PathBuf> {
    let mut markers = vec![
        PathBuf::from(r"C:\Users\Public\Desktop\Visual Studio Code.lnk"),
        PathBuf::from(r"C:\Program Files\Microsoft VS Code\Code.exe"),
    ];
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        markers.push(
            PathBuf::from(local)
                .join("Programs")
                .join("Microsoft VS Code")
                .join("Code.exe"),
        );
    }
    markers
}

pub struct WindowsPlatform {
    search_roots: Vec<PathBuf>,
}

impl WindowsPlatform {
    pub fn new(search_roots: Vec<PathBuf>) -> Self {
        Self { search_roots }
    }

    /// `cmd /C start "" <app>`; the empty string is the window title slot
    ///
    /// Names containing cmd metacharacters are rejected.
    pub fn start_command(app: &str) -> Result<CommandSpec> {
        if let Some(c) = app.chars().find(|c| CMD_METACHARS.contains(c)) {
            return Err(PilotError::Launch(format!("app name {:?} contains {:?}", app, c)));
        }
        Ok(CommandSpec::new("cmd", ["/C", "start", "", app]))
    }

    pub fn taskkill_command(app: &str) -> CommandSpec {
        let image = if app.to_lowercase().ends_with(EXE_SUFFIX) {
            app.to_string()
        } else {
            format!("{}{}", app, EXE_SUFFIX)
        };
        CommandSpec::new("taskkill", vec!["/f".to_string(), "/im".to_string(), image])
    }
}

impl Platform for WindowsPlatform {
    fn family(&self) -> PlatformFamily {
        PlatformFamily::Windows
    }

    fn launch(&self, app: &str) -> Result<()> {
        Self::start_command(app)?
            .run()
            .map_err(|e| PilotError::Launch(e.to_string()))
    }

    fn fallback_search(&self, app: &str) -> Option<PathBuf> {
        find_executable(&self.search_roots, app, EXE_SUFFIX)
    }

    fn launch_path(&self, path: &Path) -> Result<()> {
        spawn_path(path)
    }

    fn terminate(&self, app: &str) -> Result<()> {
        Self::taskkill_command(app).run()
    }

    fn run_shell(&self, command: &str) -> Result<()> {
        run_shell_with("cmd", "/C", command)
    }

    fn open_in_editor(&self, path: &Path) -> Result<Editor> {
        let file = path.to_string_lossy().into_owned();
        if first_existing(&vscode_markers()).is_some() {
            // `code` is a .cmd shim, so it has to go through the shell
            if CommandSpec::new("cmd", ["/C", "code", file.as_str()]).spawn().is_ok() {
                return Ok(Editor::VsCode);
            }
        }
        CommandSpec::new("notepad", [file.as_str()]).spawn()?;
        Ok(Editor::Notepad)
    }
}
