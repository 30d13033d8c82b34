//! Process-wide build log sinks.
//!
//! Every notable step of a compiler invocation (process path, arguments,
//! exit code, captured line counts) is appended to the configured sink.
//! When no sink is configured the [`NopLog`] stands in, so callers never
//! branch on an absent logger.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

/// Append-only sink for build log lines.
pub trait BuildLog: Send + Sync {
    fn append(&self, line: &str);
}

/// Log sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopLog;

impl BuildLog for NopLog {
    fn append(&self, _line: &str) {}
}

/// Append-only file-backed log sink.
#[derive(Debug)]
pub struct FileLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileLog {
    /// Open the log file in append mode, creating it (and its parent
    /// directory) if necessary.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                crate::util::fs::ensure_dir(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file: {}", path.display()))?;

        Ok(FileLog {
            path,
            file: Mutex::new(file),
        })
    }

    /// Get the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BuildLog for FileLog {
    fn append(&self, line: &str) {
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        if let Err(e) = writeln!(file, "{}", line) {
            tracing::warn!("failed to append to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_log_appends_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build.log");

        let log = FileLog::open(&path).unwrap();
        log.append("Process: csc.exe");
        log.append("Exit code: 0");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Process: csc.exe\nExit code: 0\n");
    }

    #[test]
    fn test_file_log_reopen_preserves_existing_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build.log");

        FileLog::open(&path).unwrap().append("first");
        FileLog::open(&path).unwrap().append("second");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn test_nop_log_ignores_everything() {
        let log = NopLog;
        log.append("nothing happens");
    }
}
