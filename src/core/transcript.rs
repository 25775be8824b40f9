//! On-disk transcript persistence.
//!
//! The transcript is stored as a compact JSON array of `{role, content}`
//! objects and rewritten wholesale on every save.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::core::config::data::path_display;
use crate::core::message::Message;

/// Errors raised while reading or writing the transcript file.
#[derive(Debug)]
pub enum TranscriptError {
    /// The transcript file could not be read.
    Read { path: PathBuf, source: io::Error },

    /// The transcript file exists but is not a JSON array of messages.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The transcript file could not be written.
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::Read { path, source } => {
                write!(
                    f,
                    "Failed to read transcript at {}: {}",
                    path_display(path),
                    source
                )
            }
            TranscriptError::Parse { path, source } => {
                write!(
                    f,
                    "Failed to parse transcript at {}: {}",
                    path_display(path),
                    source
                )
            }
            TranscriptError::Write { path, source } => {
                write!(
                    f,
                    "Failed to write transcript at {}: {}",
                    path_display(path),
                    source
                )
            }
        }
    }
}

impl StdError for TranscriptError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            TranscriptError::Read { source, .. } => Some(source),
            TranscriptError::Parse { source, .. } => Some(source),
            TranscriptError::Write { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptStore {
    path: PathBuf,
}

impl TranscriptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Message>, TranscriptError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| TranscriptError::Read {
            path: self.path.clone(),
            source,
        })?;
        let messages: Vec<Message> =
            serde_json::from_str(&contents).map_err(|source| TranscriptError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = messages.len(), "loaded transcript");
        Ok(messages)
    }

    /// Like [`load`](Self::load), but a missing file is created empty instead
    /// of failing. A file that exists and does not parse is still an error so
    /// that a damaged history is never silently overwritten.
    pub fn load_or_create(&self) -> Result<Vec<Message>, TranscriptError> {
        if self.path.exists() {
            return self.load();
        }
        self.clear()?;
        Ok(Vec::new())
    }

    pub fn save(&self, messages: &[Message]) -> Result<(), TranscriptError> {
        let contents = serde_json::to_vec(messages).map_err(|source| TranscriptError::Write {
            path: self.path.clone(),
            source: source.into(),
        })?;
        self.write_contents(&contents)?;
        debug!(path = %self.path.display(), count = messages.len(), "saved transcript");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), TranscriptError> {
        self.write_contents(b"[]")?;
        debug!(path = %self.path.display(), "cleared transcript");
        Ok(())
    }

    fn write_contents(&self, contents: &[u8]) -> Result<(), TranscriptError> {
        let to_write_error = |source: io::Error| TranscriptError::Write {
            path: self.path.clone(),
            source,
        };

        let parent = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir).map_err(to_write_error)?;
        }

        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new_in("."),
        }
        .map_err(to_write_error)?;

        temp_file.write_all(contents).map_err(to_write_error)?;
        temp_file.as_file_mut().sync_all().map_err(to_write_error)?;
        temp_file
            .persist(&self.path)
            .map_err(|err| to_write_error(err.error))?;
        Ok(())
    }
}
