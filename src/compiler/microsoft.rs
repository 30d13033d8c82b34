//! Microsoft C# 6.0 compiler variant.
//!
//! csc.exe reports warnings and errors on standard output and emits
//! Windows `.pdb` debug symbols, so this variant reclassifies its output
//! after every compile and runs pdb2mdb.exe over compiled libraries to
//! produce `.mdb` symbols the Mono debugger understands.

use std::path::{Path, PathBuf};

use crate::util::fs::remove_file_if_exists;
use crate::util::log::BuildLog;
use crate::util::shell::Shell;

use super::errors::CompilerError;
use super::launch::{os_dependent_spec, Platform, ProcessLaunchSpec, ProcessRuntime};
use super::profile::runtime_assembly_path;
use super::{report_channels, run_compiler, Compiler, OutputCapture, RunOutcome};

/// Compiler executable filename.
pub const COMPILER_EXE: &str = "csc.exe";

/// Debug-symbol converter executable filename.
pub const CONVERTER_EXE: &str = "pdb2mdb.exe";

/// Directory the toolchain drops transient `.pdb` files into, relative to
/// the working directory of the build.
const TEMP_OUTPUT_DIR: &str = "Temp";

/// The Microsoft C# 6.0 compiler and its symbol converter.
#[derive(Debug)]
pub struct MicrosoftCompiler {
    compiler_path: PathBuf,
    converter_path: PathBuf,
}

impl MicrosoftCompiler {
    /// Resolve executable paths under the toolchain directory.
    pub fn new(directory: &Path) -> Self {
        MicrosoftCompiler {
            compiler_path: directory.join(COMPILER_EXE),
            converter_path: directory.join(CONVERTER_EXE),
        }
    }

    /// Both the compiler and the symbol converter must be present.
    pub fn is_available(directory: &Path) -> bool {
        directory.join(COMPILER_EXE).is_file() && directory.join(CONVERTER_EXE).is_file()
    }

    /// Path to csc.exe.
    pub fn compiler_path(&self) -> &Path {
        &self.compiler_path
    }

    /// Path to pdb2mdb.exe.
    pub fn converter_path(&self) -> &Path {
        &self.converter_path
    }

    /// csc runs with the standard library disabled and every base-library
    /// reference made explicit, so compiles are pinned to the runtime
    /// profile rather than whatever the compiler ships with.
    fn compile_arguments(
        profile: &str,
        data_dir: &Path,
        response_file: &Path,
    ) -> Result<String, CompilerError> {
        let mscorlib = runtime_assembly_path(data_dir, profile, "mscorlib.dll")?;
        let system = runtime_assembly_path(data_dir, profile, "System.dll")?;
        let system_core = runtime_assembly_path(data_dir, profile, "System.Core.dll")?;
        let system_xml = runtime_assembly_path(data_dir, profile, "System.Xml.dll")?;

        Ok(format!(
            "-nostdlib+ -noconfig -nologo -r:\"{}\" -r:\"{}\" -r:\"{}\" -r:\"{}\" @{}",
            mscorlib.display(),
            system.display(),
            system_core.display(),
            system_xml.display(),
            response_file.display()
        ))
    }
}

impl Compiler for MicrosoftCompiler {
    fn name(&self) -> &'static str {
        "Microsoft C# 6.0"
    }

    fn needs_symbol_conversion(&self) -> bool {
        true
    }

    fn compile_spec(
        &self,
        platform: Platform,
        profile: &str,
        data_dir: &Path,
        response_file: &Path,
    ) -> Result<ProcessLaunchSpec, CompilerError> {
        let arguments = Self::compile_arguments(profile, data_dir, response_file)?;
        Ok(os_dependent_spec(
            platform,
            ProcessRuntime::Clr40,
            &self.compiler_path,
            arguments,
            data_dir,
        ))
    }

    fn convert_debug_symbols(
        &self,
        platform: Platform,
        library: &Path,
        data_dir: &Path,
        log: &dyn BuildLog,
    ) -> Result<RunOutcome, CompilerError> {
        let spec = os_dependent_spec(
            platform,
            ProcessRuntime::Clr40,
            &self.converter_path,
            format!("\"{}\"", library.display()),
            data_dir,
        );

        let outcome = run_compiler(&spec, log)?;

        // The compiler leaves a Windows .pdb behind; the .mdb produced by
        // the converter supersedes it. Conversion has completed once the
        // process exited, whatever happens to this cleanup.
        let pdb = transient_pdb_path(Path::new(TEMP_OUTPUT_DIR), library);
        cleanup_transient_pdb(&pdb, log);

        Ok(outcome)
    }

    fn report_compile_output(
        &self,
        capture: &mut OutputCapture,
        shell: &Shell,
        log: &dyn BuildLog,
    ) {
        // csc writes warnings and errors to standard output; move them to
        // the error channel so failure detection sees them.
        capture.reclassify_output_as_errors();
        report_channels(capture, shell, log);
    }

    fn report_symbol_output(&self, capture: &OutputCapture, shell: &Shell, log: &dyn BuildLog) {
        let lines = filtered_lines(capture.output());
        let noun = if lines.len() == 1 { "line" } else { "lines" };
        log.append(&format!(
            "- {} output ({} {}):",
            CONVERTER_EXE,
            lines.len(),
            noun
        ));

        for (i, line) in lines.iter().enumerate() {
            shell.out_line(&format!("{}: {}", i, line));
            log.append(&format!("{}: {}", i, line));
        }
    }
}

/// Path of the transient `.pdb` the toolchain leaves behind for a compiled
/// library, named after the library's stem.
fn transient_pdb_path(temp_dir: &Path, library: &Path) -> PathBuf {
    let mut name = library.file_stem().unwrap_or_default().to_os_string();
    name.push(".pdb");
    temp_dir.join(name)
}

/// Delete a transient symbol file. A missing file is fine; anything else
/// is a non-fatal warning.
fn cleanup_transient_pdb(pdb: &Path, log: &dyn BuildLog) {
    match remove_file_if_exists(pdb) {
        Ok(true) => log.append(&format!("Deleted {}", pdb.display())),
        Ok(false) => {}
        Err(e) => {
            tracing::warn!("failed to delete {}: {}", pdb.display(), e);
            log.append(&format!("Warning: failed to delete {}: {}", pdb.display(), e));
        }
    }
}

/// Trim captured converter lines and drop the ones that end up empty.
fn filtered_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{touch, RecordingLog};
    use crate::util::shell::{ColorChoice, Shell};
    use tempfile::TempDir;

    fn quiet_shell() -> Shell {
        Shell::from_flags(true, false, ColorChoice::Never, false)
    }

    #[test]
    fn test_is_available_requires_both_executables() {
        let tmp = TempDir::new().unwrap();
        assert!(!MicrosoftCompiler::is_available(tmp.path()));

        touch(&tmp.path().join(COMPILER_EXE));
        assert!(!MicrosoftCompiler::is_available(tmp.path()));

        touch(&tmp.path().join(CONVERTER_EXE));
        assert!(MicrosoftCompiler::is_available(tmp.path()));
    }

    #[test]
    fn test_is_available_converter_alone_is_not_enough() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join(CONVERTER_EXE));
        assert!(!MicrosoftCompiler::is_available(tmp.path()));
    }

    #[test]
    fn test_compile_spec_exact_argument_string() {
        let compiler = MicrosoftCompiler::new(Path::new("/tools"));
        let spec = compiler
            .compile_spec(
                Platform::Windows,
                "4.5",
                Path::new("/data"),
                Path::new("/tmp/args.rsp"),
            )
            .unwrap();

        assert_eq!(spec.program, PathBuf::from("/tools/csc.exe"));
        assert_eq!(
            spec.arguments,
            "-nostdlib+ -noconfig -nologo \
             -r:\"/data/Mono/lib/mono/4.5/mscorlib.dll\" \
             -r:\"/data/Mono/lib/mono/4.5/System.dll\" \
             -r:\"/data/Mono/lib/mono/4.5/System.Core.dll\" \
             -r:\"/data/Mono/lib/mono/4.5/System.Xml.dll\" \
             @/tmp/args.rsp"
        );
    }

    #[test]
    fn test_compile_spec_on_linux_runs_under_mono() {
        let compiler = MicrosoftCompiler::new(Path::new("/tools"));
        let spec = compiler
            .compile_spec(
                Platform::Linux,
                "4.5",
                Path::new("/data"),
                Path::new("/tmp/args.rsp"),
            )
            .unwrap();

        assert_eq!(spec.program, PathBuf::from("/data/MonoBleedingEdge/bin/mono"));
        assert!(spec.arguments.starts_with("\"/tools/csc.exe\" -nostdlib+"));
    }

    #[test]
    fn test_compile_spec_empty_profile_is_a_configuration_error() {
        let compiler = MicrosoftCompiler::new(Path::new("/tools"));
        let err = compiler
            .compile_spec(
                Platform::Windows,
                "",
                Path::new("/data"),
                Path::new("/tmp/args.rsp"),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CompilerError::AssemblyNotResolved { .. }
        ));
    }

    #[test]
    fn test_report_compile_output_moves_everything_to_the_error_channel() {
        let compiler = MicrosoftCompiler::new(Path::new("/tools"));
        let log = RecordingLog::new();
        let mut capture = OutputCapture::from_channels(
            vec!["warning CS0168".to_string(), "error CS1002".to_string()],
            vec!["earlier".to_string()],
        );

        compiler.report_compile_output(&mut capture, &quiet_shell(), &log);

        assert!(capture.output().is_empty());
        assert_eq!(
            capture.errors(),
            ["earlier", "warning CS0168", "error CS1002"]
        );
    }

    #[test]
    fn test_filtered_lines_drops_blank_lines_and_trims() {
        let lines: Vec<String> = ["", "  ", "warning X", "error Y", "   "]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(filtered_lines(&lines), ["warning X", "error Y"]);
    }

    #[test]
    fn test_report_symbol_output_plural_header_and_indices() {
        let compiler = MicrosoftCompiler::new(Path::new("/tools"));
        let log = RecordingLog::new();
        let capture = OutputCapture::from_channels(
            vec![
                "".to_string(),
                "  ".to_string(),
                "warning X".to_string(),
                "error Y".to_string(),
                "   ".to_string(),
            ],
            Vec::new(),
        );

        compiler.report_symbol_output(&capture, &quiet_shell(), &log);

        assert_eq!(
            log.lines(),
            [
                "- pdb2mdb.exe output (2 lines):",
                "0: warning X",
                "1: error Y"
            ]
        );
    }

    #[test]
    fn test_report_symbol_output_singular_header() {
        let compiler = MicrosoftCompiler::new(Path::new("/tools"));
        let log = RecordingLog::new();
        let capture =
            OutputCapture::from_channels(vec!["one survivor".to_string()], Vec::new());

        compiler.report_symbol_output(&capture, &quiet_shell(), &log);

        assert_eq!(log.lines()[0], "- pdb2mdb.exe output (1 line):");
    }

    #[test]
    fn test_transient_pdb_path_uses_the_library_stem() {
        let pdb = transient_pdb_path(Path::new("Temp"), Path::new("/out/Foo.dll"));
        assert_eq!(pdb, PathBuf::from("Temp/Foo.pdb"));
    }

    #[test]
    fn test_cleanup_transient_pdb_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let pdb = tmp.path().join("Foo.pdb");
        touch(&pdb);
        let log = RecordingLog::new();

        cleanup_transient_pdb(&pdb, &log);
        assert!(!pdb.exists());
        assert!(log.contains("Deleted"));

        // Nothing left to delete; no warning either
        cleanup_transient_pdb(&pdb, &log);
        assert!(!log.contains("Warning"));
    }

    #[cfg(unix)]
    #[test]
    fn test_convert_debug_symbols_completes_regardless_of_exit_code() {
        use crate::test_support::fixtures::fake_mono_runtime;

        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("data");
        // Under the launch convention, $1 is the tool and $2 its argument
        fake_mono_runtime(&data_dir, "#!/bin/sh\necho \"converting $2\"\nexit 5\n");

        let compiler = MicrosoftCompiler::new(Path::new("/tools"));
        let log = RecordingLog::new();
        let outcome = compiler
            .convert_debug_symbols(
                Platform::Linux,
                Path::new("/out/Foo.dll"),
                &data_dir,
                &log,
            )
            .unwrap();

        assert_eq!(outcome.exit_code, 5);
        assert_eq!(outcome.capture.output(), ["converting /out/Foo.dll"]);
        assert!(log.contains("Exit code: 5"));
    }
}
