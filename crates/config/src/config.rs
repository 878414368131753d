//! Core configuration structures and loading logic

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file
    Io(std::io::Error),
    /// TOML parsing error
    Parse(toml::de::Error),
    /// No library directory was provided by file, environment, or CLI
    MissingDirectory,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::MissingDirectory => {
                write!(f, "No path or directory were provided")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Video file extensions scanned when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg", "m2v", "ts",
];

/// Default minimum file size in MB below which files are dropped.
pub const DEFAULT_MIN_SIZE_MB: u64 = 10;

/// Default minimum duration in seconds below which files are dropped.
pub const DEFAULT_MIN_DURATION_SECS: u64 = 60;

/// Video library configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryConfig {
    /// Directory to scan for VR videos (required, no default)
    pub dir: Option<PathBuf>,
    /// File extensions to include, matched literally against each file
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extensions: default_extensions(),
        }
    }
}

/// Output document configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Path the generated JSON document is written to
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// Explicit base URL for video links; derived from [web] when unset
    pub base_url: Option<String>,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("deovr")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            base_url: None,
        }
    }
}

/// Web server settings used to derive the base URL when none is explicit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebConfig {
    /// Serve links over https instead of http
    #[serde(default)]
    pub ssl: bool,
    /// Host name for video links (default "localhost")
    #[serde(default = "default_host")]
    pub host: String,
    /// Port for video links; 80/443 inferred from the protocol when unset
    pub port: Option<u16>,
}

fn default_host() -> String {
    "localhost".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            ssl: false,
            host: default_host(),
            port: None,
        }
    }
}

/// Size and duration filter configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    /// Minimum file size in MB (0 disables the size check)
    #[serde(default = "default_min_size_mb")]
    pub min_size_mb: u64,
    /// Minimum duration in seconds (0 disables the duration check)
    #[serde(default = "default_min_duration_secs")]
    pub min_duration_secs: u64,
}

fn default_min_size_mb() -> u64 {
    DEFAULT_MIN_SIZE_MB
}

fn default_min_duration_secs() -> u64 {
    DEFAULT_MIN_DURATION_SECS
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_size_mb: default_min_size_mb(),
            min_duration_secs: default_min_duration_secs(),
        }
    }
}

/// Repeat schedule configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScheduleConfig {
    /// Seconds between scans (0 = run once and exit)
    #[serde(default)]
    pub interval_secs: u64,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Fully resolved settings consumed by the generator pipeline.
///
/// Produced by [`Config::resolve`] after file, environment, and CLI layers
/// have all been applied. The pipeline itself never reads configuration
/// sources directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Root directory to scan
    pub root: PathBuf,
    /// Non-empty extension set, matched literally
    pub extensions: Vec<String>,
    /// Path the manifest is written to
    pub output_path: PathBuf,
    /// Base URL for video links, without a trailing slash
    pub base_url: String,
    /// Minimum file size in MB (0 disables)
    pub min_size_mb: u64,
    /// Minimum duration in seconds (0 disables)
    pub min_duration_secs: u64,
    /// Seconds between scans (0 = run once)
    pub interval_secs: u64,
}

/// Convert a string representation of truth to a bool.
///
/// True values are `y`, `yes`, `t`, `true`, `on`, and `1`; false values are
/// `n`, `no`, `f`, `false`, `off`, and `0` (case-insensitive). Anything else
/// returns `None`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Parses the TOML file and fills missing optional fields with defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    ///
    /// Overrides the following values if environment variables are set:
    /// - DEOVR_JSON_GEN_DIR -> library.dir
    /// - DEOVR_JSON_GEN_EXT (comma-separated) -> library.extensions
    /// - DEOVR_JSON_GEN_OUT -> output.path
    /// - DEOVR_JSON_GEN_URL -> output.base_url
    /// - DEOVR_JSON_GEN_MIN_SIZE_MB -> filter.min_size_mb
    /// - DEOVR_JSON_GEN_MIN_DURATION_SECS -> filter.min_duration_secs
    /// - DEOVR_JSON_GEN_LOOP -> schedule.interval_secs
    /// - WEB_SSL / WEB_HOST / WEB_PORT -> web.ssl / web.host / web.port
    ///
    /// Unparseable values keep the existing setting.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("DEOVR_JSON_GEN_DIR") {
            let trimmed = val.trim();
            if !trimmed.is_empty() {
                self.library.dir = Some(PathBuf::from(trimmed));
            }
        }

        if let Ok(val) = env::var("DEOVR_JSON_GEN_EXT") {
            let exts: Vec<String> = val
                .split(',')
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
            if !exts.is_empty() {
                self.library.extensions = exts;
            }
        }

        if let Ok(val) = env::var("DEOVR_JSON_GEN_OUT") {
            let trimmed = val.trim();
            if !trimmed.is_empty() {
                self.output.path = PathBuf::from(trimmed);
            }
        }

        if let Ok(val) = env::var("DEOVR_JSON_GEN_URL") {
            let trimmed = val.trim();
            if !trimmed.is_empty() {
                self.output.base_url = Some(trimmed.to_string());
            }
        }

        if let Ok(val) = env::var("DEOVR_JSON_GEN_MIN_SIZE_MB") {
            if let Ok(mb) = val.parse::<u64>() {
                self.filter.min_size_mb = mb;
            }
        }

        if let Ok(val) = env::var("DEOVR_JSON_GEN_MIN_DURATION_SECS") {
            if let Ok(secs) = val.parse::<u64>() {
                self.filter.min_duration_secs = secs;
            }
        }

        if let Ok(val) = env::var("DEOVR_JSON_GEN_LOOP") {
            if let Ok(secs) = val.parse::<u64>() {
                self.schedule.interval_secs = secs;
            }
        }

        if let Ok(val) = env::var("WEB_SSL") {
            if let Some(ssl) = parse_bool(&val) {
                self.web.ssl = ssl;
            }
        }

        if let Ok(val) = env::var("WEB_HOST") {
            let trimmed = val.trim();
            if !trimmed.is_empty() {
                self.web.host = trimmed.to_string();
            }
        }

        if let Ok(val) = env::var("WEB_PORT") {
            if let Ok(port) = val.parse::<u16>() {
                self.web.port = Some(port);
            }
        }
    }

    /// Load configuration from file and apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// The base URL for video links, without a trailing slash.
    ///
    /// An explicit `output.base_url` wins; otherwise the URL is derived from
    /// the `[web]` settings as `http[s]://host[:port]`.
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.output.base_url {
            return url.trim_end_matches('/').to_string();
        }

        let protocol = if self.web.ssl { "https" } else { "http" };
        match self.web.port {
            Some(port) => format!("{}://{}:{}", protocol, self.web.host, port),
            None => format!("{}://{}", protocol, self.web.host),
        }
    }

    /// Resolve the configuration into the settings the generator consumes.
    ///
    /// Fails if no library directory was provided by any layer. An empty
    /// extension list falls back to [`DEFAULT_EXTENSIONS`].
    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let root = self
            .library
            .dir
            .clone()
            .ok_or(ConfigError::MissingDirectory)?;

        let extensions = if self.library.extensions.is_empty() {
            default_extensions()
        } else {
            self.library.extensions.clone()
        };

        Ok(Settings {
            root,
            extensions,
            output_path: self.output.path.clone(),
            base_url: self.base_url(),
            min_size_mb: self.filter.min_size_mb,
            min_duration_secs: self.filter.min_duration_secs,
            interval_secs: self.schedule.interval_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests don't interfere with each other
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear all config-related env vars
    fn clear_env_vars() {
        env::remove_var("DEOVR_JSON_GEN_DIR");
        env::remove_var("DEOVR_JSON_GEN_EXT");
        env::remove_var("DEOVR_JSON_GEN_OUT");
        env::remove_var("DEOVR_JSON_GEN_URL");
        env::remove_var("DEOVR_JSON_GEN_MIN_SIZE_MB");
        env::remove_var("DEOVR_JSON_GEN_MIN_DURATION_SECS");
        env::remove_var("DEOVR_JSON_GEN_LOOP");
        env::remove_var("WEB_SSL");
        env::remove_var("WEB_HOST");
        env::remove_var("WEB_PORT");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse_toml("").expect("Empty TOML should parse");

        assert_eq!(config.library.dir, None);
        assert_eq!(config.library.extensions.len(), DEFAULT_EXTENSIONS.len());
        assert_eq!(config.output.path, PathBuf::from("deovr"));
        assert_eq!(config.output.base_url, None);
        assert!(!config.web.ssl);
        assert_eq!(config.web.host, "localhost");
        assert_eq!(config.web.port, None);
        assert_eq!(config.filter.min_size_mb, 10);
        assert_eq!(config.filter.min_duration_secs, 60);
        assert_eq!(config.schedule.interval_secs, 0);
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let toml_str = r#"
[library]
dir = "/media/vr"

[filter]
min_size_mb = 50
"#;
        let config = Config::parse_toml(toml_str).expect("Partial TOML should parse");

        assert_eq!(config.library.dir, Some(PathBuf::from("/media/vr")));
        assert_eq!(config.filter.min_size_mb, 50);
        assert_eq!(config.filter.min_duration_secs, 60); // default
        assert_eq!(config.schedule.interval_secs, 0); // default
    }

    #[test]
    fn test_parse_bool_truthy_and_falsy() {
        for v in ["y", "yes", "t", "true", "on", "1", "TRUE", "Yes"] {
            assert_eq!(parse_bool(v), Some(true), "{} should be true", v);
        }
        for v in ["n", "no", "f", "false", "off", "0", "FALSE", "No"] {
            assert_eq!(parse_bool(v), Some(false), "{} should be false", v);
        }
        for v in ["", "maybe", "2", "enabled"] {
            assert_eq!(parse_bool(v), None, "{} should be unrecognized", v);
        }
    }

    #[test]
    fn test_base_url_default() {
        let config = Config::default();
        assert_eq!(config.base_url(), "http://localhost");
    }

    #[test]
    fn test_base_url_derived_from_web_settings() {
        let mut config = Config::default();
        config.web.ssl = true;
        config.web.host = "media.example.com".to_string();
        config.web.port = Some(8443);
        assert_eq!(config.base_url(), "https://media.example.com:8443");
    }

    #[test]
    fn test_base_url_explicit_wins_and_trims_trailing_slash() {
        let mut config = Config::default();
        config.web.host = "ignored.example.com".to_string();
        config.output.base_url = Some("http://nas.local:8080/".to_string());
        assert_eq!(config.base_url(), "http://nas.local:8080");
    }

    #[test]
    fn test_resolve_requires_directory() {
        let config = Config::default();
        let err = config.resolve().unwrap_err();
        assert!(matches!(err, ConfigError::MissingDirectory));
    }

    #[test]
    fn test_resolve_empty_extensions_fall_back_to_defaults() {
        let mut config = Config::default();
        config.library.dir = Some(PathBuf::from("/media/vr"));
        config.library.extensions.clear();

        let settings = config.resolve().expect("resolve should succeed");
        assert_eq!(settings.extensions.len(), DEFAULT_EXTENSIONS.len());
        assert!(settings.extensions.iter().any(|e| e == "mp4"));
    }

    #[test]
    fn test_resolve_carries_all_settings() {
        let toml_str = r#"
[library]
dir = "/media/vr"
extensions = ["mp4", "mkv"]

[output]
path = "/srv/deovr/deovr"
base_url = "http://nas.local"

[filter]
min_size_mb = 5
min_duration_secs = 30

[schedule]
interval_secs = 600
"#;
        let config = Config::parse_toml(toml_str).expect("Valid TOML");
        let settings = config.resolve().expect("resolve should succeed");

        assert_eq!(settings.root, PathBuf::from("/media/vr"));
        assert_eq!(settings.extensions, vec!["mp4", "mkv"]);
        assert_eq!(settings.output_path, PathBuf::from("/srv/deovr/deovr"));
        assert_eq!(settings.base_url, "http://nas.local");
        assert_eq!(settings.min_size_mb, 5);
        assert_eq!(settings.min_duration_secs, 30);
        assert_eq!(settings.interval_secs, 600);
    }

    #[test]
    fn test_env_override_directory_and_extensions() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env_vars();

        let mut config = Config::default();
        env::set_var("DEOVR_JSON_GEN_DIR", "/mnt/videos");
        env::set_var("DEOVR_JSON_GEN_EXT", "mp4, mkv ,webm");
        config.apply_env_overrides();
        clear_env_vars();

        assert_eq!(config.library.dir, Some(PathBuf::from("/mnt/videos")));
        assert_eq!(config.library.extensions, vec!["mp4", "mkv", "webm"]);
    }

    #[test]
    fn test_env_override_web_settings() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env_vars();

        let mut config = Config::default();
        env::set_var("WEB_SSL", "yes");
        env::set_var("WEB_HOST", "nas.local");
        env::set_var("WEB_PORT", "8443");
        config.apply_env_overrides();
        clear_env_vars();

        assert!(config.web.ssl);
        assert_eq!(config.web.host, "nas.local");
        assert_eq!(config.web.port, Some(8443));
        assert_eq!(config.base_url(), "https://nas.local:8443");
    }

    #[test]
    fn test_env_override_invalid_values_ignored() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env_vars();

        let mut config = Config::default();
        env::set_var("DEOVR_JSON_GEN_MIN_SIZE_MB", "not-a-number");
        env::set_var("WEB_SSL", "maybe");
        env::set_var("WEB_PORT", "99999");
        config.apply_env_overrides();
        clear_env_vars();

        assert_eq!(config.filter.min_size_mb, DEFAULT_MIN_SIZE_MB);
        assert!(!config.web.ssl);
        assert_eq!(config.web.port, None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_config_parses_all_sections(
            min_size in 0u64..10_000,
            min_duration in 0u64..100_000,
            interval in 0u64..1_000_000,
            ssl in proptest::bool::ANY,
            port in proptest::option::of(1u16..u16::MAX),
        ) {
            let toml_str = format!(
                r#"
[library]
dir = "/media/vr"

[web]
ssl = {}
{}

[filter]
min_size_mb = {}
min_duration_secs = {}

[schedule]
interval_secs = {}
"#,
                ssl,
                port.map(|p| format!("port = {}", p)).unwrap_or_default(),
                min_size,
                min_duration,
                interval
            );

            let config = Config::parse_toml(&toml_str).expect("Valid TOML should parse");

            prop_assert_eq!(config.library.dir, Some(PathBuf::from("/media/vr")));
            prop_assert_eq!(config.web.ssl, ssl);
            prop_assert_eq!(config.web.port, port);
            prop_assert_eq!(config.filter.min_size_mb, min_size);
            prop_assert_eq!(config.filter.min_duration_secs, min_duration);
            prop_assert_eq!(config.schedule.interval_secs, interval);
        }

        #[test]
        fn prop_env_overrides_thresholds(
            initial_size in 0u64..1_000,
            override_size in 0u64..10_000,
            override_duration in 0u64..10_000,
        ) {
            let _guard = ENV_MUTEX.lock().unwrap();
            clear_env_vars();

            let mut config = Config::default();
            config.filter.min_size_mb = initial_size;

            env::set_var("DEOVR_JSON_GEN_MIN_SIZE_MB", override_size.to_string());
            env::set_var("DEOVR_JSON_GEN_MIN_DURATION_SECS", override_duration.to_string());
            config.apply_env_overrides();
            clear_env_vars();

            prop_assert_eq!(config.filter.min_size_mb, override_size);
            prop_assert_eq!(config.filter.min_duration_secs, override_duration);
        }

        #[test]
        fn prop_env_overrides_loop_interval(
            initial in 0u64..1_000,
            interval in 0u64..1_000_000,
        ) {
            let _guard = ENV_MUTEX.lock().unwrap();
            clear_env_vars();

            let mut config = Config::default();
            config.schedule.interval_secs = initial;

            env::set_var("DEOVR_JSON_GEN_LOOP", interval.to_string());
            config.apply_env_overrides();
            clear_env_vars();

            prop_assert_eq!(config.schedule.interval_secs, interval);
        }
    }
}
