//! # yamlvalid-cli — Workload Manifest Linter
//!
//! Provides the `yamlvalid` command-line interface.
//!
//! ```bash
//! yamlvalid pod.yaml
//! yamlvalid --strict pod.yaml
//! yamlvalid --config lint.yaml pod.yaml
//! yamlvalid --list-rules
//! ```
//!
//! ## Output
//!
//! Diagnostics go to stdout, one per line, as `<baseName>:<ruleId> <message>`.
//! Logs go to stderr and are controlled by `-v`.
//!
//! ## Exit Status
//!
//! Findings do not change the exit status unless strict mode is enabled
//! with `--strict` or `strict: true` in the configuration file.

pub mod config;
pub mod validate;

use std::path::Path;

/// Printed when no file is given.
pub const USAGE: &str = "Usage: yamlvalid <filename>";

/// Normal completion.
pub const EXIT_OK: u8 = 0;

/// Strict mode and at least one finding was reported.
pub const EXIT_FINDINGS: u8 = 1;

/// Operational failure: bad configuration, or an unreadable or
/// undecodable manifest in strict mode.
pub const EXIT_ERROR: u8 = 2;

/// Base name of `path`, used to label diagnostics.
///
/// Falls back to the full path when there is no final component
/// (for example `/` or `..`).
pub fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_directories() {
        assert_eq!(display_name(Path::new("deploy/prod/pod.yaml")), "pod.yaml");
        assert_eq!(display_name(Path::new("/abs/pod.yml")), "pod.yml");
        assert_eq!(display_name(Path::new("pod.yaml")), "pod.yaml");
    }

    #[test]
    fn display_name_falls_back_to_path() {
        assert_eq!(display_name(Path::new("/")), "/");
        assert_eq!(display_name(Path::new("..")), "..");
    }
}
