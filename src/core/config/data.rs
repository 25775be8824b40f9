use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of `config.toml`. Every key is optional; defaults are applied
/// when the file is resolved into [`ChatSettings`](super::defaults::ChatSettings).
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Full URL of the chat endpoint (e.g., "http://localhost:11434/api/chat")
    pub endpoint: Option<String>,
    /// Model identifier sent with every request (e.g., "llama3.1")
    pub model: Option<String>,
    /// Where the transcript is persisted; relative paths resolve against the
    /// working directory
    pub transcript: Option<PathBuf>,
    /// Capture mouse events (wheel scrolling) in the terminal
    pub mouse: Option<bool>,
    /// Write diagnostic logs to this file
    pub log_file: Option<PathBuf>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.config/palaver/config.toml` → `~/.config/palaver/config.toml`
/// - macOS: `/Users/user/Library/Application Support/...` → `~/Library/Application Support/...`
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
