//! Runtime profile assembly resolution.

use std::path::{Path, PathBuf};

use super::errors::CompilerError;

/// Base-library assemblies every compile references.
pub const RUNTIME_ASSEMBLIES: [&str; 4] = [
    "mscorlib.dll",
    "System.dll",
    "System.Core.dll",
    "System.Xml.dll",
];

/// Resolve a base-library assembly under the runtime profile directory,
/// `<data_dir>/Mono/lib/mono/<profile>/<assembly>`.
///
/// Only path construction happens here. A missing file surfaces later,
/// when the compiler process fails against the bad reference.
pub fn runtime_assembly_path(
    data_dir: &Path,
    profile: &str,
    assembly: &str,
) -> Result<PathBuf, CompilerError> {
    if profile.trim().is_empty() || assembly.trim().is_empty() {
        return Err(CompilerError::AssemblyNotResolved {
            assembly: assembly.to_string(),
            profile: profile.to_string(),
        });
    }

    Ok(data_dir
        .join("Mono")
        .join("lib")
        .join("mono")
        .join(profile)
        .join(assembly))
}
