//! Startup checks for the DeoVR JSON generator
//!
//! Preflight validation of the resolved settings before the first scan:
//! the library root must exist and be a directory, the output path must
//! not itself be a directory, and the extension set must be non-empty.
//! Violations are fatal configuration errors.

use deovr_json_gen_config::Settings;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for startup checks
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{0} is not a valid directory")]
    RootNotDirectory(PathBuf),

    #[error("Output path {0} is a directory")]
    OutputIsDirectory(PathBuf),

    #[error("Extension set is empty")]
    NoExtensions,
}

/// Run all preflight checks against the resolved settings.
///
/// Called once before the first generation pass; the pipeline assumes a
/// validated root and output path afterwards.
pub fn run_startup_checks(settings: &Settings) -> Result<(), StartupError> {
    if !settings.root.is_dir() {
        return Err(StartupError::RootNotDirectory(settings.root.clone()));
    }

    if settings.output_path.is_dir() {
        return Err(StartupError::OutputIsDirectory(
            settings.output_path.clone(),
        ));
    }

    if settings.extensions.is_empty() {
        return Err(StartupError::NoExtensions);
    }

    Ok(())
}
