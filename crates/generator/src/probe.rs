//! Probe module for extracting container-level metadata from video files.
//!
//! This module provides functionality to probe video files using ffprobe
//! and reduce the result to the size and duration metrics the filter and
//! manifest builder consume. A file that cannot be probed yields zero
//! metrics rather than an error, so a single broken container never stops
//! a generation pass.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use thiserror::Error;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Error type for probe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// ffprobe command failed to execute.
    #[error("ffprobe failed: {0}")]
    FfprobeFailed(String),

    /// Failed to parse ffprobe JSON output.
    #[error("Failed to parse ffprobe output: {0}")]
    ParseError(String),

    /// IO error during probe.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Container-level metrics for a single video file.
///
/// Zero values mean the probe found no usable container information; that
/// is a degraded result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetrics {
    /// File size in whole MB.
    pub size_mb: u64,
    /// Duration in whole seconds.
    pub duration_secs: u64,
}

impl MediaMetrics {
    /// Metrics for a file the probe could not read.
    pub const ZERO: MediaMetrics = MediaMetrics {
        size_mb: 0,
        duration_secs: 0,
    };
}

/// Narrow interface the pipeline uses to obtain per-file metrics.
///
/// The production implementation shells out to ffprobe; tests substitute
/// a stub so the pipeline can run against synthetic files.
pub trait MetadataProbe {
    /// Returns the metrics for the given file, degrading to
    /// [`MediaMetrics::ZERO`] when the container cannot be read.
    fn probe(&self, path: &Path) -> MediaMetrics;
}

/// Raw ffprobe JSON structures for parsing.
mod ffprobe_json {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct FfprobeOutput {
        pub format: Option<Format>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Format {
        pub duration: Option<String>,
        pub size: Option<String>,
    }
}

/// Probes a video file using ffprobe to collect format metadata.
///
/// Runs `ffprobe -v quiet -print_format json -show_format <path>` and
/// parses the JSON output.
pub fn probe_file(path: &Path) -> Result<MediaMetrics, ProbeError> {
    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_format"])
        .arg(path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProbeError::FfprobeFailed(format!(
            "ffprobe exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_ffprobe_output(&stdout)
}

/// Parses ffprobe JSON output into metrics.
///
/// A missing format section or missing/unparseable duration and size
/// fields yield zeros; only malformed JSON is an error.
pub fn parse_ffprobe_output(json_str: &str) -> Result<MediaMetrics, ProbeError> {
    let ffprobe: ffprobe_json::FfprobeOutput =
        serde_json::from_str(json_str).map_err(|e| ProbeError::ParseError(e.to_string()))?;

    let format = match ffprobe.format {
        Some(format) => format,
        None => return Ok(MediaMetrics::ZERO),
    };

    let duration_secs = format
        .duration
        .as_ref()
        .and_then(|d| d.parse::<f64>().ok())
        .map(|secs| secs as u64)
        .unwrap_or(0);

    let size_mb = format
        .size
        .as_ref()
        .and_then(|s| s.parse::<u64>().ok())
        .map(|bytes| bytes / BYTES_PER_MB)
        .unwrap_or(0);

    Ok(MediaMetrics {
        size_mb,
        duration_secs,
    })
}

/// ffprobe-backed implementation of [`MetadataProbe`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FfprobeProbe;

impl MetadataProbe for FfprobeProbe {
    fn probe(&self, path: &Path) -> MediaMetrics {
        match probe_file(path) {
            Ok(metrics) => metrics,
            Err(e) => {
                tracing::debug!("Probe failed for {}: {}", path.display(), e);
                MediaMetrics::ZERO
            }
        }
    }
}
