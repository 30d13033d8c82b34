//! `csdriver doctor` command

use anyhow::{Context, Result};

use csdriver::compiler::{self, microsoft, mono, MicrosoftCompiler, MonoCompiler};
use csdriver::util::config;

use crate::cli::DoctorArgs;

pub fn execute(args: DoctorArgs) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let config = config::load_tool_config(&cwd);
    let dir = compiler::resolve_toolchain_dir(args.compiler_dir.as_deref(), &config)?;

    println!("toolchain directory: {}", dir.display());

    let microsoft_ok = MicrosoftCompiler::is_available(&dir);
    let mono_ok = MonoCompiler::is_available(&dir);

    println!(
        "  Microsoft C# 6.0 ({} + {}): {}",
        microsoft::COMPILER_EXE,
        microsoft::CONVERTER_EXE,
        availability(microsoft_ok)
    );
    println!(
        "  Mono C# 6.0 ({}): {}",
        mono::COMPILER_EXE,
        availability(mono_ok)
    );

    Ok(if microsoft_ok || mono_ok { 0 } else { 1 })
}

fn availability(ok: bool) -> &'static str {
    if ok {
        "available"
    } else {
        "not found"
    }
}
