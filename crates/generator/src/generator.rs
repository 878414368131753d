//! Generator entry point and repeat loop.
//!
//! Runs one full pipeline pass (scan, probe, filter, classify, build,
//! write) and optionally repeats it on a fixed interval. Every pass is an
//! independent re-scan with no carried-over state; the only way to stop a
//! looping run is terminating the process.

use crate::filter::{check_thresholds, FilterDecision, FilterThresholds};
use crate::manifest::{build_manifest, build_scene, Scene};
use crate::probe::MetadataProbe;
use crate::scan::{scan_library, sort_newest_first};
use crate::startup::{run_startup_checks, StartupError};
use crate::writer::{write_manifest, WriteError};
use deovr_json_gen_config::{Config, ConfigError, Settings};
use std::time::Duration;
use thiserror::Error;

/// Error type for generator operations
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Startup check failed
    #[error("Startup check failed: {0}")]
    Startup(#[from] StartupError),

    /// Manifest write failed
    #[error("Manifest write failed: {0}")]
    Write(#[from] WriteError),
}

/// The manifest generation pipeline with its resolved settings and probe.
pub struct Generator<P: MetadataProbe> {
    settings: Settings,
    probe: P,
}

impl<P: MetadataProbe> Generator<P> {
    /// Create a generator from resolved settings.
    ///
    /// Runs the startup checks; an invalid root or output path is a fatal
    /// configuration error reported before any scan.
    pub fn new(settings: Settings, probe: P) -> Result<Self, GeneratorError> {
        run_startup_checks(&settings)?;
        Ok(Self { settings, probe })
    }

    /// Create a generator by resolving a layered configuration.
    pub fn from_config(config: &Config, probe: P) -> Result<Self, GeneratorError> {
        let settings = config.resolve()?;
        Self::new(settings, probe)
    }

    /// The resolved settings this generator runs with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run one full generation pass and return the emitted scene count.
    ///
    /// Discovery, probing, and writing happen sequentially, one file at a
    /// time. A file whose probe degrades to zero metrics is handled by the
    /// threshold filter like any other.
    pub fn generate_once(&self) -> Result<usize, GeneratorError> {
        tracing::info!("Generating DeoVR JSON for {}", self.settings.root.display());

        let mut candidates = scan_library(&self.settings.root, &self.settings.extensions);
        sort_newest_first(&mut candidates);
        tracing::debug!("Discovered {} candidate files", candidates.len());

        let thresholds = FilterThresholds {
            min_size_mb: self.settings.min_size_mb,
            min_duration_secs: self.settings.min_duration_secs,
        };

        let mut scenes: Vec<Scene> = Vec::new();
        for candidate in &candidates {
            let metrics = self.probe.probe(&candidate.path);

            match check_thresholds(&metrics, &thresholds) {
                FilterDecision::Drop {
                    size_mb,
                    duration_secs,
                } => {
                    tracing::debug!(
                        "Skipping {} ({} MB, {} s, thresholds {} MB / {} s)",
                        candidate.path.display(),
                        size_mb,
                        duration_secs,
                        thresholds.min_size_mb,
                        thresholds.min_duration_secs
                    );
                }
                FilterDecision::Keep => {
                    let relative = candidate
                        .path
                        .strip_prefix(&self.settings.root)
                        .unwrap_or(&candidate.path);
                    tracing::debug!("+ {}", candidate.path.display());
                    scenes.push(build_scene(relative, &self.settings.base_url, &metrics));
                }
            }
        }

        let count = scenes.len();
        let manifest = build_manifest(scenes);
        write_manifest(&manifest, &self.settings.output_path)?;

        tracing::info!(
            "Wrote {} scenes to {}",
            count,
            self.settings.output_path.display()
        );
        Ok(count)
    }

    /// Run the generator, repeating on the configured interval.
    ///
    /// With a zero interval the pipeline runs exactly once and returns.
    /// Otherwise it loops forever, sleeping between passes; a failed pass
    /// is logged at error level and the loop continues to the next
    /// interval rather than aborting.
    pub async fn run(&self) -> Result<(), GeneratorError> {
        if self.settings.interval_secs == 0 {
            self.generate_once()?;
            tracing::info!("Done!");
            return Ok(());
        }

        loop {
            if let Err(e) = self.generate_once() {
                tracing::error!("Generation pass failed: {}", e);
            }

            tracing::info!("Sleeping for {} seconds ...", self.settings.interval_secs);
            tokio::time::sleep(Duration::from_secs(self.settings.interval_secs)).await;
        }
    }
}
