//! Compiler variant abstraction and the shared run operation.
//!
//! Each supported C# compiler is one variant behind the [`Compiler`] trait.
//! The concrete variant is selected by an availability probe over the
//! toolchain directory (see [`select_compiler`]). Variants construct
//! platform-aware launch specs; executing a spec and draining its output is
//! the shared [`run_compiler`] operation.

use std::path::Path;

use crate::util::log::BuildLog;
use crate::util::process::ProcessBuilder;
use crate::util::shell::Shell;

pub mod detect;
pub mod errors;
pub mod launch;
pub mod microsoft;
pub mod mono;
pub mod profile;

pub use detect::{resolve_toolchain_dir, select_compiler, TOOLS_DIR_ENV};
pub use errors::CompilerError;
pub use launch::{os_dependent_spec, Platform, ProcessLaunchSpec, ProcessRuntime};
pub use microsoft::MicrosoftCompiler;
pub use mono::MonoCompiler;
pub use profile::{runtime_assembly_path, RUNTIME_ASSEMBLIES};

/// Captured output channels of one process run.
///
/// A fresh capture is produced per invocation and handed to the caller;
/// captures are never reused across runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputCapture {
    output: Vec<String>,
    errors: Vec<String>,
}

impl OutputCapture {
    /// Create an empty capture.
    pub fn new() -> Self {
        OutputCapture::default()
    }

    /// Create a capture from already-collected channel buffers.
    pub fn from_channels(output: Vec<String>, errors: Vec<String>) -> Self {
        OutputCapture { output, errors }
    }

    /// Append a line to the standard-output channel.
    pub fn push_output(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    /// Append a line to the error-output channel.
    pub fn push_error(&mut self, line: impl Into<String>) {
        self.errors.push(line.into());
    }

    /// Standard-output lines, in arrival order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Error-output lines, in arrival order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Move every standard-output line to the end of the error channel.
    ///
    /// Some compilers report warnings and errors on standard output;
    /// consumers that only inspect the error channel for failure detection
    /// would miss them otherwise.
    pub fn reclassify_output_as_errors(&mut self) {
        self.errors.append(&mut self.output);
    }
}

/// Result of one compiler or converter process run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Raw exit code; interpretation is left to the caller.
    pub exit_code: i32,
    /// Output captured during the run.
    pub capture: OutputCapture,
}

impl RunOutcome {
    /// Whether the process exited with code zero.
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// A supported compiler variant.
pub trait Compiler: Send + Sync + std::fmt::Debug {
    /// Human-readable variant name.
    fn name(&self) -> &'static str;

    /// Whether compiled debug symbols need a post-compile conversion step.
    fn needs_symbol_conversion(&self) -> bool {
        false
    }

    /// Build the launch spec for one compilation.
    ///
    /// The response file holds the full compiler argument list, one
    /// argument per line, already escaped. Construct-and-return: executing
    /// the spec and draining its output is [`run_compiler`]'s job.
    fn compile_spec(
        &self,
        platform: Platform,
        profile: &str,
        data_dir: &Path,
        response_file: &Path,
    ) -> Result<ProcessLaunchSpec, CompilerError>;

    /// Run the debug-symbol converter against a compiled library.
    fn convert_debug_symbols(
        &self,
        platform: Platform,
        library: &Path,
        data_dir: &Path,
        log: &dyn BuildLog,
    ) -> Result<RunOutcome, CompilerError> {
        let _ = (platform, library, data_dir, log);
        Err(CompilerError::SymbolConversionUnsupported {
            compiler: self.name(),
        })
    }

    /// Report captured compile output to the console and the build log.
    fn report_compile_output(
        &self,
        capture: &mut OutputCapture,
        shell: &Shell,
        log: &dyn BuildLog,
    ) {
        report_channels(capture, shell, log);
    }

    /// Report captured symbol-converter output.
    fn report_symbol_output(&self, capture: &OutputCapture, shell: &Shell, log: &dyn BuildLog) {
        let _ = (capture, shell, log);
    }
}

/// Launch a spec and drain its output.
///
/// The child's streams are read line-by-line on background threads while
/// this call blocks on process exit; the readers are joined before
/// returning, so the capture is complete. A non-zero exit code is recorded
/// on the outcome, never treated as an error here.
pub fn run_compiler(
    spec: &ProcessLaunchSpec,
    log: &dyn BuildLog,
) -> Result<RunOutcome, CompilerError> {
    log.append(&format!("Process: {}", spec.program.display()));
    log.append(&format!("Arguments: {}", spec.arguments));

    let streamed = ProcessBuilder::new(&spec.program)
        .args(spec.argv())
        .exec_streaming()
        .map_err(|source| CompilerError::Launch {
            program: spec.program.clone(),
            source: source.into(),
        })?;

    let exit_code = streamed.status.code().unwrap_or(-1);
    log.append(&format!("Exit code: {}", exit_code));

    Ok(RunOutcome {
        exit_code,
        capture: OutputCapture::from_channels(streamed.stdout_lines, streamed.stderr_lines),
    })
}

/// Default two-channel reporting: standard lines to stdout, error lines to
/// stderr, everything to the build log.
pub fn report_channels(capture: &OutputCapture, shell: &Shell, log: &dyn BuildLog) {
    for line in capture.output() {
        shell.out_line(line);
        log.append(line);
    }
    for line in capture.errors() {
        shell.err_line(line);
        log.append(line);
    }
}
