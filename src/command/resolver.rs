//! App resolution - turns a spoken application name into a running process
//!
//! Direct launch first; on failure, the platform's fallback search (Windows
//! only) looks for a matching executable under well-known install roots.

use crate::platform::Platform;
use std::path::PathBuf;

/// What was actually launched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppTarget {
    /// Name handed to the OS launcher as-is
    Direct(String),
    /// Executable discovered by fallback search
    Path(PathBuf),
}

/// Outcome of resolving and launching an app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched(AppTarget),
    NotFound,
    Error(String),
}

/// Resolves app names against a platform
pub struct AppResolver<'a> {
    platform: &'a dyn Platform,
}

impl<'a> AppResolver<'a> {
    pub fn new(platform: &'a dyn Platform) -> Self {
        Self { platform }
    }

    /// Launch `app_name`, falling back to a filesystem search
    ///
    /// A launch that does not error is reported as launched; the process is
    /// not checked afterwards.
    pub fn resolve_and_launch(&self, app_name: &str) -> LaunchOutcome {
        let app = app_name.trim().to_lowercase();
        if app.is_empty() {
            return LaunchOutcome::Error("empty app name".into());
        }

        let direct_error = match self.platform.launch(&app) {
            Ok(()) => {
                tracing::info!(app = %app, "launched directly");
                return LaunchOutcome::Launched(AppTarget::Direct(app));
            }
            Err(e) => e,
        };
        tracing::info!(app = %app, error = %direct_error, "direct launch failed, searching");

        let Some(path) = self.platform.fallback_search(&app) else {
            tracing::info!(app = %app, "no executable found");
            return LaunchOutcome::NotFound;
        };

        match self.platform.launch_path(&path) {
            Ok(()) => {
                tracing::info!(app = %app, path = %path.display(), "launched from fallback search");
                LaunchOutcome::Launched(AppTarget::Path(path))
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "fallback launch failed");
                LaunchOutcome::Error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{PilotError, Result};
    use crate::platform::{Editor, PlatformFamily};
    use std::cell::RefCell;
    use std::path::Path;

    #[derive(Default)]
    struct FakePlatform {
        direct_ok: bool,
        found: Option<PathBuf>,
        path_ok: bool,
        launched: RefCell<Vec<String>>,
    }

    impl Platform for FakePlatform {
        fn family(&self) -> PlatformFamily {
            PlatformFamily::Windows
        }
        fn launch(&self, app: &str) -> Result<()> {
            self.launched.borrow_mut().push(app.to_string());
            if self.direct_ok {
                Ok(())
            } else {
                Err(PilotError::Launch(format!("{} not found", app)))
            }
        }
        fn fallback_search(&self, _app: &str) -> Option<PathBuf> {
            self.found.clone()
        }
        fn launch_path(&self, path: &Path) -> Result<()> {
            self.launched.borrow_mut().push(path.display().to_string());
            if self.path_ok {
                Ok(())
            } else {
                Err(PilotError::Launch("access denied".into()))
            }
        }
        fn terminate(&self, _app: &str) -> Result<()> {
            Ok(())
        }
        fn run_shell(&self, _command: &str) -> Result<()> {
            Ok(())
        }
        fn open_in_editor(&self, _path: &Path) -> Result<Editor> {
            Ok(Editor::Notepad)
        }
    }

    #[test]
    fn test_direct_launch_lowercases() {
        let platform = FakePlatform {
            direct_ok: true,
            ..Default::default()
        };
        let outcome = AppResolver::new(&platform).resolve_and_launch("  Notepad ");
        assert_eq!(outcome, LaunchOutcome::Launched(AppTarget::Direct("notepad".into())));
        assert_eq!(*platform.launched.borrow(), vec!["notepad".to_string()]);
    }

    #[test]
    fn test_fallback_hit() {
        let exe = PathBuf::from("C:/Program Files/VLC/vlc.exe");
        let platform = FakePlatform {
            found: Some(exe.clone()),
            path_ok: true,
            ..Default::default()
        };
        let outcome = AppResolver::new(&platform).resolve_and_launch("vlc");
        assert_eq!(outcome, LaunchOutcome::Launched(AppTarget::Path(exe)));
    }

    #[test]
    fn test_fallback_miss_is_not_found() {
        let platform = FakePlatform::default();
        assert_eq!(
            AppResolver::new(&platform).resolve_and_launch("notepad"),
            LaunchOutcome::NotFound
        );
    }

    #[test]
    fn test_fallback_launch_failure_is_error() {
        let platform = FakePlatform {
            found: Some(PathBuf::from("x.exe")),
            ..Default::default()
        };
        assert!(matches!(
            AppResolver::new(&platform).resolve_and_launch("x"),
            LaunchOutcome::Error(_)
        ));
    }

    #[test]
    fn test_empty_name_rejected_without_launch() {
        let platform = FakePlatform {
            direct_ok: true,
            ..Default::default()
        };
        assert!(matches!(
            AppResolver::new(&platform).resolve_and_launch("   "),
            LaunchOutcome::Error(_)
        ));
        assert!(platform.launched.borrow().is_empty());
    }
}
