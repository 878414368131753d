//! Configuration crate for the DeoVR JSON generator

pub mod config;

pub use config::{
    parse_bool, Config, ConfigError, FilterConfig, LibraryConfig, OutputConfig, ScheduleConfig,
    Settings, WebConfig, DEFAULT_EXTENSIONS, DEFAULT_MIN_DURATION_SECS, DEFAULT_MIN_SIZE_MB,
};
