//! csdriver CLI - launches C# compilers for a build pipeline and
//! normalizes their diagnostics

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands, GlobalFlags};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("csdriver=debug")
    } else {
        EnvFilter::new("csdriver=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let globals = GlobalFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color: cli.color,
    };

    // Execute command
    match cli.command {
        Commands::Compile(args) => commands::compile::execute(args, &globals),
        Commands::Doctor(args) => commands::doctor::execute(args),
    }
}
