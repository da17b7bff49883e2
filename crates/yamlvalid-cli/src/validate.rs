//! # Validate Command
//!
//! Reads one manifest, runs the workload checklist over it, and writes one
//! line per finding:
//!
//! ```text
//! <baseName>:<ruleId> <message>
//! ```
//!
//! A file that cannot be read or decoded is reported on the same output and
//! no findings follow. Exit status stays 0 in every one of these cases
//! unless strict mode is on.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use yamlvalid_core::{load_document, DocumentError};
use yamlvalid_lint::Checklist;

use crate::config::LintConfig;
use crate::{display_name, EXIT_ERROR, EXIT_FINDINGS, EXIT_OK, USAGE};

/// Arguments for validating a manifest.
#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// Manifest file to validate.
    #[arg(value_name = "FILENAME")]
    pub filename: Option<PathBuf>,

    /// Exit with status 1 when any finding is reported, and 2 when the file
    /// cannot be read or decoded.
    #[arg(long)]
    pub strict: bool,

    /// Print the active checklist (id, path, message) and exit.
    #[arg(long)]
    pub list_rules: bool,

    /// Path to a YAML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Execute the validate command, writing user-facing output to `out`.
///
/// Returns the process exit code.
///
/// # Errors
///
/// Fails if the configuration file cannot be loaded or describes an
/// invalid checklist, or if writing to `out` fails. Unreadable or
/// malformed manifests are not errors; they are reported on `out`.
pub fn run_validate<W: Write>(args: &ValidateArgs, out: &mut W) -> Result<u8> {
    let config = match &args.config {
        Some(path) => LintConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => LintConfig::default(),
    };
    let strict = args.strict || config.strict;

    let checklist = Checklist::workload(&config.workload_options())
        .context("invalid checklist configuration")?;

    if args.list_rules {
        for info in checklist.rules() {
            writeln!(out, "{}\t{}\t{}", info.rule.id(), info.path, info.rule.message())?;
        }
        return Ok(EXIT_OK);
    }

    let Some(path) = args.filename.as_deref() else {
        writeln!(out, "{USAGE}")?;
        return Ok(EXIT_OK);
    };

    validate_file(&checklist, path, strict, out)
}

fn validate_file<W: Write>(
    checklist: &Checklist,
    path: &Path,
    strict: bool,
    out: &mut W,
) -> Result<u8> {
    let label = display_name(path);
    let failure_code = if strict { EXIT_ERROR } else { EXIT_OK };

    let document = match load_document(path) {
        Ok(document) => document,
        Err(DocumentError::Read { source, .. }) => {
            tracing::debug!(path = %path.display(), error = %source, "manifest unreadable");
            writeln!(out, "{label}: unable to read file: {source}")?;
            return Ok(failure_code);
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "manifest not decodable");
            writeln!(out, "YAML decode error: {e}")?;
            return Ok(failure_code);
        }
    };

    let mut findings = 0usize;
    for diagnostic in checklist.validate(&document, &label) {
        writeln!(out, "{diagnostic}")?;
        findings += 1;
    }

    tracing::info!(path = %path.display(), findings, "validation complete");

    if strict && findings > 0 {
        Ok(EXIT_FINDINGS)
    } else {
        Ok(EXIT_OK)
    }
}
