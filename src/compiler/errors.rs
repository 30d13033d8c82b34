//! Compiler invocation error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while preparing or launching a compiler process.
///
/// A non-zero exit code is not an error; it is recorded on
/// [`RunOutcome`](super::RunOutcome) and interpreted by the caller. Cleanup
/// failures after symbol conversion are logged warnings, not errors.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// A referenced runtime assembly path could not be resolved.
    #[error("runtime assembly `{assembly}` could not be resolved for profile `{profile}`")]
    AssemblyNotResolved { assembly: String, profile: String },

    /// No supported compiler was found under the toolchain directory.
    #[error("no C# compiler found in {}", directory.display())]
    NoCompilerFound { directory: PathBuf },

    /// No toolchain directory was configured and none could be detected.
    #[error(
        "no toolchain directory configured\n\
         \n\
         Pass --compiler-dir, set CSDRIVER_TOOLS_DIR, or configure\n\
         `[toolchain] directory` in .csdriver/config.toml."
    )]
    NoToolchainDir,

    /// The process could not be spawned or awaited.
    #[error("failed to run `{}`", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Symbol conversion was requested from a variant without a converter.
    #[error("`{compiler}` does not carry a debug-symbol converter")]
    SymbolConversionUnsupported { compiler: &'static str },
}
