//! File-backed tracing setup.
//!
//! The terminal belongs to the UI, so logs go to a file. Follow them with
//! `tail -f` from another terminal. `RUST_LOG` overrides the default `info`.

use crate::error::{GhseekError, Result};
use std::path::Path;

pub fn init(log_path: &Path) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let directory = log_path
        .parent()
        .ok_or_else(|| GhseekError::Logging(format!("no parent directory: {log_path:?}")))?;
    std::fs::create_dir_all(directory)?;

    let file_name = log_path
        .file_name()
        .ok_or_else(|| GhseekError::Logging(format!("invalid log file path: {log_path:?}")))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|e| GhseekError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("nested").join("ghseek.log");

        // a subscriber may already be installed by another test
        let _ = init(&log_file);

        assert!(dir.path().join("nested").exists());
    }

    #[test]
    fn init_rejects_path_without_file_name() {
        assert!(init(Path::new("/")).is_err());
    }
}
