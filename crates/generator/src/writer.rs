//! Writer module serializing the manifest to disk.
//!
//! The document is pretty-printed with 4-space indentation and written
//! via a temp-file-then-rename in the target directory, so a process
//! killed mid-pass never leaves a truncated manifest behind.

use crate::manifest::Manifest;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for manifest writing.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The target path is an existing directory.
    #[error("Output path is a directory: {0}")]
    OutputIsDirectory(PathBuf),

    /// Serialization failed.
    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Serialized document was not valid UTF-8.
    #[error("Manifest is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// IO error writing the document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes the manifest to a pretty-printed JSON string, 4-space indent.
pub fn to_pretty_json(manifest: &Manifest) -> Result<String, WriteError> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    manifest.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// The temp path the manifest is staged at before the rename.
fn staging_path(target: &Path) -> PathBuf {
    let mut staged = target.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

/// Writes the manifest to the target path.
///
/// Fails fast if the target is an existing directory. A missing parent
/// directory is created. The document is staged at `<target>.tmp` and
/// renamed into place.
pub fn write_manifest(manifest: &Manifest, target: &Path) -> Result<(), WriteError> {
    if target.is_dir() {
        return Err(WriteError::OutputIsDirectory(target.to_path_buf()));
    }

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = to_pretty_json(manifest)?;
    let staged = staging_path(target);
    fs::write(&staged, json)?;
    fs::rename(&staged, target)?;

    Ok(())
}
