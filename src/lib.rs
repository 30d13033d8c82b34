//! csdriver - A compiler invocation driver for C# toolchains
//!
//! This crate provides the core library functionality for csdriver,
//! including compiler variant selection, platform-aware process launching,
//! output capture, and diagnostic reporting.

pub mod compiler;
pub mod util;

/// Test utilities and mocks for csdriver unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a recording log sink and fake toolchain
/// fixtures.
#[cfg(test)]
pub mod test_support;

pub use compiler::{
    run_compiler, select_compiler, Compiler, CompilerError, OutputCapture, Platform,
    ProcessLaunchSpec, ProcessRuntime, RunOutcome,
};

pub use util::log::{BuildLog, FileLog, NopLog};
pub use util::shell::Shell;
