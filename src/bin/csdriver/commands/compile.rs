//! `csdriver compile` command

use anyhow::{Context, Result};

use csdriver::compiler::{self, Platform};
use csdriver::util::config;
use csdriver::util::log::{BuildLog, FileLog, NopLog};
use csdriver::util::shell::{Shell, Status};

use crate::cli::{CompileArgs, GlobalFlags, MessageFormat};

pub fn execute(args: CompileArgs, globals: &GlobalFlags) -> Result<i32> {
    let shell = Shell::from_flags(
        globals.quiet,
        globals.verbose,
        globals.color,
        args.message_format == MessageFormat::Json,
    );

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let config = config::load_tool_config(&cwd);

    let log: Box<dyn BuildLog> = match args.log_file.as_ref().or(config.log.file.as_ref()) {
        Some(path) => Box::new(FileLog::open(path)?),
        None => Box::new(NopLog),
    };

    let toolchain_dir = compiler::resolve_toolchain_dir(args.compiler_dir.as_deref(), &config)?;
    let selected = compiler::select_compiler(&toolchain_dir)?;
    let platform = args.platform.unwrap_or_else(Platform::host);

    shell.status(
        Status::Compiling,
        format!("{} ({})", args.response_file.display(), selected.name()),
    );

    let spec = selected.compile_spec(platform, &args.profile, &args.data_dir, &args.response_file)?;
    let mut outcome = compiler::run_compiler(&spec, log.as_ref())?;
    selected.report_compile_output(&mut outcome.capture, &shell, log.as_ref());

    if !outcome.succeeded() {
        shell.error(format!(
            "{} exited with code {}",
            selected.name(),
            outcome.exit_code
        ));
        return Ok(outcome.exit_code);
    }

    if let Some(library) = &args.library {
        if selected.needs_symbol_conversion() {
            shell.status(Status::Converting, library.display().to_string());
            let conversion =
                selected.convert_debug_symbols(platform, library, &args.data_dir, log.as_ref())?;
            selected.report_symbol_output(&conversion.capture, &shell, log.as_ref());
        } else {
            shell.warn(format!(
                "{} needs no symbol conversion; skipping {}",
                selected.name(),
                library.display()
            ));
        }
    }

    shell.status(Status::Finished, selected.name());
    Ok(outcome.exit_code)
}
