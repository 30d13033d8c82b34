//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use csdriver::compiler::Platform;
use csdriver::util::shell::ColorChoice;

/// csdriver - launches C# compilers for a build pipeline and normalizes
/// their diagnostics
#[derive(Parser)]
#[command(name = "csdriver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status output (compiler diagnostics still print)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

/// Global flags shared by every subcommand.
pub struct GlobalFlags {
    pub quiet: bool,
    pub verbose: bool,
    pub color: ColorChoice,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a response file of C# arguments with the selected toolchain
    Compile(CompileArgs),

    /// Check which compiler variants are available
    Doctor(DoctorArgs),
}

#[derive(Args)]
pub struct CompileArgs {
    /// Response file holding the compiler argument list, one per line
    #[arg(long)]
    pub response_file: PathBuf,

    /// Host data directory holding the runtime profiles and Mono runtimes
    #[arg(long)]
    pub data_dir: PathBuf,

    /// Runtime profile the compile targets
    #[arg(long, default_value = "4.5")]
    pub profile: String,

    /// Target platform (defaults to the host platform)
    #[arg(long)]
    pub platform: Option<Platform>,

    /// Toolchain directory holding the compiler executables
    #[arg(long)]
    pub compiler_dir: Option<PathBuf>,

    /// Compiled library to run debug-symbol conversion on afterwards
    #[arg(long)]
    pub library: Option<PathBuf>,

    /// Append-only build log file
    #[arg(long, env = "CSDRIVER_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Output format: human or json
    #[arg(long, default_value = "human")]
    pub message_format: MessageFormat,
}

#[derive(Args)]
pub struct DoctorArgs {
    /// Toolchain directory holding the compiler executables
    #[arg(long)]
    pub compiler_dir: Option<PathBuf>,
}

/// Output format for compile diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageFormat {
    #[default]
    Human,
    Json,
}

impl std::str::FromStr for MessageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(MessageFormat::Human),
            "json" => Ok(MessageFormat::Json),
            _ => Err(format!(
                "invalid message format '{}'; expected 'human' or 'json'",
                s
            )),
        }
    }
}
