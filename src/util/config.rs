//! Configuration file support for csdriver.
//!
//! csdriver supports two configuration file locations:
//! - Global: `<user config dir>/csdriver/config.toml` - User-wide defaults
//! - Project: `.csdriver/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// csdriver configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Toolchain settings
    pub toolchain: ToolchainSettings,

    /// Build log settings
    pub log: LogSettings,
}

/// Toolchain settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Directory holding the compiler executables (csc.exe, pdb2mdb.exe,
    /// mcs.exe)
    pub directory: Option<PathBuf>,
}

/// Build log settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Append-only build log file
    pub file: Option<PathBuf>,
}

impl ToolConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: ToolConfig) {
        if other.toolchain.directory.is_some() {
            self.toolchain.directory = other.toolchain.directory;
        }
        if other.log.file.is_some() {
            self.log.file = other.log.file;
        }
    }
}

/// Path of the project-level config file under `cwd`.
pub fn project_config_path(cwd: &Path) -> PathBuf {
    cwd.join(".csdriver").join("config.toml")
}

/// Path of the global config file, if a user config directory exists.
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "csdriver")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the global config and overlay the project config from `cwd`.
pub fn load_tool_config(cwd: &Path) -> ToolConfig {
    let mut config = global_config_path()
        .map(|path| ToolConfig::load_or_default(&path))
        .unwrap_or_default();

    config.merge(ToolConfig::load_or_default(&project_config_path(cwd)));
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_parses_toolchain_and_log_sections() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[toolchain]\ndirectory = \"/opt/roslyn\"\n\n[log]\nfile = \"build.log\"\n",
        )
        .unwrap();

        let config = ToolConfig::load(&path).unwrap();
        assert_eq!(
            config.toolchain.directory,
            Some(PathBuf::from("/opt/roslyn"))
        );
        assert_eq!(config.log.file, Some(PathBuf::from("build.log")));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ToolConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert!(config.toolchain.directory.is_none());
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = ToolConfig::default();
        base.toolchain.directory = Some(PathBuf::from("/global"));
        base.log.file = Some(PathBuf::from("global.log"));

        let mut project = ToolConfig::default();
        project.toolchain.directory = Some(PathBuf::from("/project"));

        base.merge(project);
        assert_eq!(base.toolchain.directory, Some(PathBuf::from("/project")));
        // Unset project values leave the global ones alone
        assert_eq!(base.log.file, Some(PathBuf::from("global.log")));
    }

    #[test]
    fn test_project_config_path_layout() {
        let path = project_config_path(Path::new("/work"));
        assert_eq!(path, PathBuf::from("/work/.csdriver/config.toml"));
    }
}
