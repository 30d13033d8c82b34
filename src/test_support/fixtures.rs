//! Shared fixtures for unit tests.

use std::path::Path;
use std::sync::Mutex;

use crate::util::log::BuildLog;

/// Build log that records appended lines for assertions.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        RecordingLog::default()
    }

    /// Snapshot of the appended lines, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Whether any appended line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl BuildLog for RecordingLog {
    fn append(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// Create an empty file, with parent directories.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, "").unwrap();
}

/// Install a fake `mono` script under `<data_dir>/MonoBleedingEdge/bin/`,
/// matching where the CLR 4.0 launch convention looks for it.
#[cfg(unix)]
pub fn fake_mono_runtime(data_dir: &Path, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let bin = data_dir.join("MonoBleedingEdge").join("bin");
    std::fs::create_dir_all(&bin).unwrap();

    let mono = bin.join("mono");
    std::fs::write(&mono, script).unwrap();

    let mut perms = std::fs::metadata(&mono).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&mono, perms).unwrap();
}
