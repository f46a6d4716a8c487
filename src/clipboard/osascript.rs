//! AppleScript automation through `osascript`

use std::io;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde::Deserialize;
use tracing::debug;

use super::escape::escape_for_shell;
use super::Automation;

/// Where the clipboard scripts live and how to run them
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Script that loads a snippet onto the clipboard and pastes it
    pub paste_script: PathBuf,
    /// Script that prints the clipboard's snippet
    pub copy_script: PathBuf,
    pub osascript: String,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            paste_script: PathBuf::from("PasteSnippet.applescript"),
            copy_script: PathBuf::from("GetSnippet.applescript"),
            osascript: "osascript".to_string(),
        }
    }
}

/// Runs the configured AppleScripts
#[derive(Debug, Clone)]
pub struct OsascriptAutomation {
    config: ClipboardConfig,
}

impl OsascriptAutomation {
    pub fn new(config: ClipboardConfig) -> Self {
        Self { config }
    }

    /// Shell line that feeds an already shell-escaped payload to the paste script.
    ///
    /// `xargs -0` hands the whole payload over as one argument, and `-s o`
    /// makes osascript print script errors on stdout. The osascript binary
    /// and the script path are single-quoted like the payload.
    pub fn push_command(&self, payload: &str) -> String {
        format!(
            "printf '%s' '{}' | xargs -0 '{}' -s o '{}'",
            payload,
            escape_for_shell(&self.config.osascript),
            escape_for_shell(&self.config.paste_script.to_string_lossy())
        )
    }
}

fn stdout_text(output: Output) -> io::Result<String> {
    if !output.status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!(
                "script exited with status {}: {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        ));
    }
    String::from_utf8(output.stdout)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

impl Automation for OsascriptAutomation {
    fn push(&mut self, payload: &str) -> io::Result<String> {
        debug!(script = %self.config.paste_script.display(), bytes = payload.len(), "running paste script");
        let output = Command::new("sh")
            .arg("-c")
            .arg(self.push_command(payload))
            .output()?;
        stdout_text(output)
    }

    fn pull(&mut self) -> io::Result<String> {
        debug!(script = %self.config.copy_script.display(), "running copy script");
        let output = Command::new(&self.config.osascript)
            .arg(&self.config.copy_script)
            .output()?;
        stdout_text(output)
    }
}
