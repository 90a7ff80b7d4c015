//! OS capability surface
//!
//! One trait, three implementations (Windows, macOS, Linux/other Unix),
//! chosen once at startup from the detected platform family. Everything here
//! is best-effort: a launch that spawns without error counts as launched.

pub mod linux;
pub mod macos;
pub mod process;
pub mod search;
pub mod windows;

use crate::core::config::SearchConfig;
use crate::core::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};

pub use linux::LinuxPlatform;
pub use macos::MacPlatform;
pub use windows::WindowsPlatform;

/// Detected operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Windows,
    MacOs,
    Linux,
}

impl PlatformFamily {
    /// Family of the running host; unknown Unixes are treated as Linux
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" | "ios" => Self::MacOs,
            _ => Self::Linux,
        }
    }
}

/// Editor the generated file was opened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editor {
    VsCode,
    Notepad,
    TextEdit,
    SystemViewer,
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VsCode => "VS Code",
            Self::Notepad => "Notepad",
            Self::TextEdit => "TextEdit",
            Self::SystemViewer => "the default text viewer",
        })
    }
}

/// Platform-specific launch, termination, search and shell access
pub trait Platform {
    fn family(&self) -> PlatformFamily;

    /// Direct launch by name ("start", app bundle, or process spawn)
    fn launch(&self, app: &str) -> Result<()>;

    /// Search well-known install locations for an executable matching `app`
    fn fallback_search(&self, app: &str) -> Option<PathBuf>;

    /// Launch an executable found by `fallback_search`
    fn launch_path(&self, path: &Path) -> Result<()>;

    /// Terminate a process by name; `PilotError::Unsupported` where unavailable
    fn terminate(&self, app: &str) -> Result<()>;

    /// Run shell text verbatim and wait for it
    fn run_shell(&self, command: &str) -> Result<()>;

    /// Open a file in the preferred editor, falling back to a plain viewer
    fn open_in_editor(&self, path: &Path) -> Result<Editor>;
}

/// Construct the platform implementation for `family`
pub fn for_family(family: PlatformFamily, search: &SearchConfig) -> Box<dyn Platform> {
    match family {
        PlatformFamily::Windows => Box::new(WindowsPlatform::new(
            search
                .roots
                .clone()
                .unwrap_or_else(windows::default_search_roots),
        )),
        PlatformFamily::MacOs => Box::new(MacPlatform),
        PlatformFamily::Linux => Box::new(LinuxPlatform),
    }
}

/// Construct the platform implementation for the running host
pub fn detect(search: &SearchConfig) -> Box<dyn Platform> {
    let family = PlatformFamily::detect();
    tracing::info!(?family, "platform detected");
    for_family(family, search)
}
