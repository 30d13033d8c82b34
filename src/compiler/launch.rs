//! Platform-dependent process launch specs.
//!
//! Windows executes managed tools directly; Mac and Linux run them under
//! the Mono runtime shipped in the host data directory. The runtime tag
//! picks which of the two bundled Mono installations hosts the tool.

use std::path::{Path, PathBuf};

/// Host platform the toolchain runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Mac,
    Linux,
}

impl Platform {
    /// The platform csdriver itself was built for.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Linux
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "mac" | "macos" => Ok(Platform::Mac),
            "linux" => Ok(Platform::Linux),
            _ => Err(format!(
                "invalid platform '{}'; expected 'windows', 'mac', or 'linux'",
                s
            )),
        }
    }
}

/// Runtime version tag a launched tool needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessRuntime {
    Clr20,
    Clr40,
}

/// Resolved description of what to execute.
///
/// `arguments` is a single pre-quoted argument string, the convention this
/// compiler family uses on its native platform; [`ProcessLaunchSpec::argv`]
/// tokenizes it for direct exec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessLaunchSpec {
    pub program: PathBuf,
    pub arguments: String,
}

impl ProcessLaunchSpec {
    /// Create a launch spec.
    pub fn new(program: impl Into<PathBuf>, arguments: impl Into<String>) -> Self {
        ProcessLaunchSpec {
            program: program.into(),
            arguments: arguments.into(),
        }
    }

    /// Tokenize the argument string for exec.
    ///
    /// Whitespace separates arguments; double quotes group, and are
    /// stripped from the resulting token.
    pub fn argv(&self) -> Vec<String> {
        split_arguments(&self.arguments)
    }

    /// Render the full command line for logs and error messages.
    pub fn display_command(&self) -> String {
        format!("{} {}", self.program.display(), self.arguments)
    }
}

/// Build a launch spec appropriate to the host platform and runtime tag.
pub fn os_dependent_spec(
    platform: Platform,
    runtime: ProcessRuntime,
    program: &Path,
    arguments: String,
    data_dir: &Path,
) -> ProcessLaunchSpec {
    match platform {
        Platform::Windows => ProcessLaunchSpec::new(program, arguments),
        Platform::Mac | Platform::Linux => {
            let mono = match runtime {
                ProcessRuntime::Clr20 => data_dir.join("Mono").join("bin").join("mono"),
                ProcessRuntime::Clr40 => {
                    data_dir.join("MonoBleedingEdge").join("bin").join("mono")
                }
            };
            ProcessLaunchSpec::new(mono, format!("\"{}\" {}", program.display(), arguments))
        }
    }
}

fn split_arguments(arguments: &str) -> Vec<String> {
    let mut argv = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut started = false;

    for ch in arguments.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                started = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    argv.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if started {
        argv.push(current);
    }
    argv
}
