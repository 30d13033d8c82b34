//! Mono C# 6.0 compiler variant.
//!
//! mcs resolves its own base libraries, keeps its output channels
//! separated, and emits `.mdb` debug symbols directly, so this variant is
//! the plain case: hand the response file over and report both channels
//! unchanged.

use std::path::{Path, PathBuf};

use super::errors::CompilerError;
use super::launch::{os_dependent_spec, Platform, ProcessLaunchSpec, ProcessRuntime};
use super::Compiler;

/// Compiler executable filename.
pub const COMPILER_EXE: &str = "mcs.exe";

/// The Mono C# 6.0 compiler.
#[derive(Debug)]
pub struct MonoCompiler {
    compiler_path: PathBuf,
}

impl MonoCompiler {
    /// Resolve the executable path under the toolchain directory.
    pub fn new(directory: &Path) -> Self {
        MonoCompiler {
            compiler_path: directory.join(COMPILER_EXE),
        }
    }

    /// Only the compiler itself is required; there is no converter.
    pub fn is_available(directory: &Path) -> bool {
        directory.join(COMPILER_EXE).is_file()
    }

    /// Path to mcs.exe.
    pub fn compiler_path(&self) -> &Path {
        &self.compiler_path
    }
}

impl Compiler for MonoCompiler {
    fn name(&self) -> &'static str {
        "Mono C# 6.0"
    }

    fn compile_spec(
        &self,
        platform: Platform,
        _profile: &str,
        data_dir: &Path,
        response_file: &Path,
    ) -> Result<ProcessLaunchSpec, CompilerError> {
        Ok(os_dependent_spec(
            platform,
            ProcessRuntime::Clr40,
            &self.compiler_path,
            format!("@{}", response_file.display()),
            data_dir,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::touch;
    use tempfile::TempDir;

    #[test]
    fn test_is_available_needs_only_the_compiler() {
        let tmp = TempDir::new().unwrap();
        assert!(!MonoCompiler::is_available(tmp.path()));

        touch(&tmp.path().join(COMPILER_EXE));
        assert!(MonoCompiler::is_available(tmp.path()));
    }

    #[test]
    fn test_compile_spec_passes_the_response_file_alone() {
        let compiler = MonoCompiler::new(Path::new("/tools"));
        let spec = compiler
            .compile_spec(
                Platform::Windows,
                "4.5",
                Path::new("/data"),
                Path::new("/tmp/args.rsp"),
            )
            .unwrap();

        assert_eq!(spec.program, PathBuf::from("/tools/mcs.exe"));
        assert_eq!(spec.arguments, "@/tmp/args.rsp");
    }

    #[test]
    fn test_no_symbol_conversion_step() {
        use crate::test_support::fixtures::RecordingLog;

        let compiler = MonoCompiler::new(Path::new("/tools"));
        assert!(!compiler.needs_symbol_conversion());

        let err = compiler
            .convert_debug_symbols(
                Platform::Linux,
                Path::new("/out/Foo.dll"),
                Path::new("/data"),
                &RecordingLog::new(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CompilerError::SymbolConversionUnsupported { .. }
        ));
    }
}
