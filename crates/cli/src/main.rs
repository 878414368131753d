//! CLI entry point for the DeoVR JSON generator
//!
//! Parses command line arguments, layers them over environment variables
//! and an optional TOML configuration file, and runs the generator.
//! Precedence: CLI arguments > environment > config file > defaults.

use clap::Parser;
use deovr_json_gen::{FfprobeProbe, Generator};
use deovr_json_gen_config::{parse_bool, Config};
use std::path::PathBuf;
use std::process::ExitCode;

/// DeoVR JSON Generator - scene list manifests from a VR video library
#[derive(Parser, Debug)]
#[command(name = "deovr-json-gen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to directory with VR videos
    dir: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// VR video file extensions
    #[arg(short = 'e', long = "ext", num_args = 0..)]
    ext: Vec<String>,

    /// Output file path for the generated JSON document
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Base URL for video links
    #[arg(long)]
    url: Option<String>,

    /// Minimum file size in MB (0 disables the check)
    #[arg(long)]
    min_size_mb: Option<u64>,

    /// Minimum duration in seconds (0 disables the check)
    #[arg(long)]
    min_duration_secs: Option<u64>,

    /// Generate every X seconds (0 = run once)
    #[arg(short = 'l', long = "loop")]
    loop_secs: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Apply CLI arguments on top of the file and environment layers.
fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(dir) = &args.dir {
        config.library.dir = Some(dir.clone());
    }
    if !args.ext.is_empty() {
        config.library.extensions = args.ext.clone();
    }
    if let Some(out) = &args.out {
        config.output.path = out.clone();
    }
    if let Some(url) = &args.url {
        config.output.base_url = Some(url.clone());
    }
    if let Some(mb) = args.min_size_mb {
        config.filter.min_size_mb = mb;
    }
    if let Some(secs) = args.min_duration_secs {
        config.filter.min_duration_secs = secs;
    }
    if let Some(secs) = args.loop_secs {
        config.schedule.interval_secs = secs;
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let verbose = args.verbose
        || std::env::var("DEOVR_JSON_GEN_VERBOSE")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(false);

    // Respect RUST_LOG if set, otherwise derive the filter from the
    // verbose flag. Verbosity never affects manifest content.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "deovr_json_gen=debug,deovr_json_gen_cli=debug".to_string()
        } else {
            "deovr_json_gen=info,deovr_json_gen_cli=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let mut config = match &args.config {
        Some(path) => match Config::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ERROR: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    config.apply_env_overrides();
    apply_cli_overrides(&mut config, &args);

    let generator = match Generator::from_config(&config, FfprobeProbe) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = generator.run().await {
        eprintln!("ERROR: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
