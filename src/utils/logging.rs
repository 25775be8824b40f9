use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::core::constants::LOG_FILTER_ENV;

const DEFAULT_LOG_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Route `tracing` output to `log_file`, appending. Without a file nothing is
/// installed: the interface owns the terminal, so there is nowhere else to log.
pub fn init_tracing(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let Some(path) = log_file else {
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| err as Box<dyn Error>)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn no_log_file_is_a_noop() {
        assert!(init_tracing(None).is_ok());
    }

    #[test]
    fn unwritable_log_path_is_an_error() {
        let temp_dir = TempDir::new().expect("tempdir");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file").expect("write");

        let result = init_tracing(Some(&blocker.join("palaver.log")));

        assert!(result.is_err());
    }
}
