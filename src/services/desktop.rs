//! Input simulation and screen capture
//!
//! Each family drives stock tools: PowerShell on Windows, osascript and
//! screencapture on macOS, xdotool and the first available screenshot
//! utility elsewhere.

use crate::core::error::{PilotError, Result};
use crate::platform::process::CommandSpec;
use crate::platform::PlatformFamily;
use std::path::Path;

/// Keys the assistant presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    VolumeUp,
    VolumeDown,
}

/// Keyboard injection and screenshots
pub trait Desktop {
    fn press_key(&self, key: Key, times: u32) -> Result<()>;
    fn type_text(&self, text: &str) -> Result<()>;
    fn screenshot(&self, path: &Path) -> Result<()>;
}

/// Desktop driven by external command-line tools
pub struct ShellDesktop {
    family: PlatformFamily,
}

impl ShellDesktop {
    pub fn new(family: PlatformFamily) -> Self {
        Self { family }
    }

    /// Commands that press `key` `times` times
    pub fn key_commands(&self, key: Key, times: u32) -> Vec<CommandSpec> {
        match self.family {
            PlatformFamily::Windows => {
                // 175 / 174 are the virtual volume keys
                let code = if key == Key::VolumeUp { 175 } else { 174 };
                let script = format!(
                    "$w = New-Object -ComObject WScript.Shell; 1..{} | ForEach-Object {{ $w.SendKeys([char]{}) }}",
                    times, code
                );
                vec![powershell(&script)]
            }
            PlatformFamily::MacOs => {
                let delta = if key == Key::VolumeUp { "+" } else { "-" };
                let script = format!(
                    "set volume output volume ((output volume of (get volume settings)) {} {})",
                    delta,
                    times * 2
                );
                vec![CommandSpec::new("osascript", ["-e", script.as_str()])]
            }
            PlatformFamily::Linux => {
                let keysym = if key == Key::VolumeUp {
                    "XF86AudioRaiseVolume"
                } else {
                    "XF86AudioLowerVolume"
                };
                vec![CommandSpec::new(
                    "xdotool",
                    vec![
                        "key".to_string(),
                        "--repeat".to_string(),
                        times.to_string(),
                        keysym.to_string(),
                    ],
                )]
            }
        }
    }

    /// Command that types `text` literally
    pub fn type_command(&self, text: &str) -> CommandSpec {
        match self.family {
            PlatformFamily::Windows => {
                let script = format!(
                    "(New-Object -ComObject WScript.Shell).SendKeys('{}')",
                    escape_send_keys(text).replace('\'', "''")
                );
                powershell(&script)
            }
            PlatformFamily::MacOs => {
                let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
                let script = format!(
                    "tell application \"System Events\" to keystroke \"{}\"",
                    escaped
                );
                CommandSpec::new("osascript", ["-e", script.as_str()])
            }
            PlatformFamily::Linux => CommandSpec::new("xdotool", ["type", "--", text]),
        }
    }

    /// Candidate screenshot commands, tried in order until one succeeds
    pub fn screenshot_commands(&self, path: &Path) -> Vec<CommandSpec> {
        let file = path.to_string_lossy().into_owned();
        match self.family {
            PlatformFamily::Windows => {
                let script = format!(
                    "Add-Type -AssemblyName System.Windows.Forms,System.Drawing; \
                     $b = [System.Windows.Forms.Screen]::PrimaryScreen.Bounds; \
                     $bmp = New-Object System.Drawing.Bitmap $b.Width, $b.Height; \
                     $g = [System.Drawing.Graphics]::FromImage($bmp); \
                     $g.CopyFromScreen($b.Location, [System.Drawing.Point]::Empty, $b.Size); \
                     $bmp.Save('{}')",
                    file.replace('\'', "''")
                );
                vec![powershell(&script)]
            }
            PlatformFamily::MacOs => vec![CommandSpec::new("screencapture", ["-x", file.as_str()])],
            PlatformFamily::Linux => vec![
                CommandSpec::new("gnome-screenshot", ["-f", file.as_str()]),
                CommandSpec::new("scrot", ["-o", file.as_str()]),
                CommandSpec::new("import", ["-window", "root", file.as_str()]),
            ],
        }
    }
}

impl Desktop for ShellDesktop {
    fn press_key(&self, key: Key, times: u32) -> Result<()> {
        for spec in self.key_commands(key, times) {
            spec.run()?;
        }
        Ok(())
    }

    fn type_text(&self, text: &str) -> Result<()> {
        self.type_command(text).run()
    }

    fn screenshot(&self, path: &Path) -> Result<()> {
        let mut last_error = None;
        for spec in self.screenshot_commands(path) {
            match spec.run() {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!(program = %spec.program, error = %e, "screenshot tool failed");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error
            .unwrap_or_else(|| PilotError::Collaborator("no screenshot tool available".into())))
    }
}

fn powershell(script: &str) -> CommandSpec {
    CommandSpec::new("powershell", ["-NoProfile", "-Command", script])
}

/// Wrap SendKeys metacharacters in braces so they type literally
fn escape_send_keys(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '+' | '^' | '%' | '~' | '(' | ')' | '{' | '}' | '[' | ']' => {
                out.push('{');
                out.push(c);
                out.push('}');
            }
            _ => out.push(c),
        }
    }
    out
}
