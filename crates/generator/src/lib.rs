//! DeoVR JSON Generator
//!
//! Library crate implementing the manifest-generation pipeline: file
//! discovery, metadata probing, filename classification, threshold
//! filtering, and scene-list assembly and serialization for the DeoVR
//! player.

pub mod classify;
pub mod filter;
pub mod generator;
pub mod manifest;
pub mod probe;
pub mod scan;
pub mod startup;
pub mod writer;

pub use deovr_json_gen_config as config;
pub use deovr_json_gen_config::{Config, Settings};

pub use classify::{classify_screen_type, classify_stereo_mode, ScreenType, StereoMode};
pub use filter::{check_thresholds, FilterDecision, FilterThresholds};
pub use generator::{Generator, GeneratorError};
pub use manifest::{
    build_manifest, build_scene, encode_video_url, Library, Manifest, Scene,
    LIBRARY_NAME, PLACEHOLDER_THUMBNAIL_URL,
};
pub use probe::{probe_file, FfprobeProbe, MediaMetrics, MetadataProbe, ProbeError};
pub use scan::{scan_library, sort_newest_first, ScanCandidate};
pub use startup::{run_startup_checks, StartupError};
pub use writer::{to_pretty_json, write_manifest, WriteError};
