//! Compiler variant and toolchain directory detection.

use std::path::{Path, PathBuf};

use crate::util::config::ToolConfig;

use super::errors::CompilerError;
use super::microsoft::MicrosoftCompiler;
use super::mono::MonoCompiler;
use super::Compiler;

/// Environment variable naming the toolchain directory.
pub const TOOLS_DIR_ENV: &str = "CSDRIVER_TOOLS_DIR";

/// Pick the compiler variant available under `directory`.
///
/// The Microsoft compiler is preferred when its full toolchain (compiler
/// plus symbol converter) is present; the Mono compiler is the fallback.
pub fn select_compiler(directory: &Path) -> Result<Box<dyn Compiler>, CompilerError> {
    if MicrosoftCompiler::is_available(directory) {
        tracing::debug!("using Microsoft compiler from {}", directory.display());
        return Ok(Box::new(MicrosoftCompiler::new(directory)));
    }

    if MonoCompiler::is_available(directory) {
        tracing::debug!("using Mono compiler from {}", directory.display());
        return Ok(Box::new(MonoCompiler::new(directory)));
    }

    Err(CompilerError::NoCompilerFound {
        directory: directory.to_path_buf(),
    })
}

/// Resolve the toolchain directory.
///
/// Priority: explicit override, config file, `CSDRIVER_TOOLS_DIR`, then
/// the directory of an `mcs`/`csc` executable found on PATH.
pub fn resolve_toolchain_dir(
    explicit: Option<&Path>,
    config: &ToolConfig,
) -> Result<PathBuf, CompilerError> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = &config.toolchain.directory {
        return Ok(dir.clone());
    }

    if let Ok(dir) = std::env::var(TOOLS_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    for name in ["mcs", "csc"] {
        if let Ok(path) = which::which(name) {
            if let Some(parent) = path.parent() {
                tracing::debug!(
                    "toolchain directory inferred from PATH: {}",
                    parent.display()
                );
                return Ok(parent.to_path_buf());
            }
        }
    }

    Err(CompilerError::NoToolchainDir)
}
