//! keepsake-orient - EXIF orientation for gallery photos
//!
//! Reads the orientation tag from JPEG headers and prints the CSS transform
//! a viewer needs to show each photo upright.

mod commands;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use keepsake_cli::output::{set_color, Status};
use keepsake_core::config::{Config, OutputFormat};
use keepsake_core::{Error, ErrorCode};
use keepsake_telemetry::{level_for_verbosity, metrics, TelemetryConfig};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::Context;

#[derive(Parser)]
#[command(name = "keepsake-orient")]
#[command(author, version, about = "Read EXIF orientation from gallery photos")]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (default: search for keepsake.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the orientation of one photo
    Read {
        /// JPEG file
        path: PathBuf,

        /// Bytes to read from the start of the file
        #[arg(long)]
        header_bytes: Option<usize>,

        /// Explain why the orientation is unknown
        #[arg(long)]
        explain: bool,
    },

    /// Scan a gallery folder
    Scan {
        /// Folder to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Bytes to read from the start of each file
        #[arg(long)]
        header_bytes: Option<usize>,
    },

    /// Print the display transform for an orientation code
    Transform {
        /// EXIF orientation code (1-8)
        code: u16,
    },

    /// Show stored and display dimensions of a photo
    Metadata {
        /// JPEG file
        path: PathBuf,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return fail(&err, cli.json),
    };

    let json = cli.json || config.schema.output.format == OutputFormat::Json;
    if cli.no_color || !config.schema.output.color {
        set_color(false);
    }

    if let Err(err) = init_logging(cli.verbose, &config) {
        let err = Error::new(ErrorCode::ConfigError, format!("{:#}", err))
            .with_suggestion("Check the [log] section of the configuration");
        return fail(&err, json);
    }

    let ctx = Context { config, json };
    let result = match cli.command {
        Commands::Read { path, header_bytes, explain } => {
            commands::read::run(&ctx, &path, header_bytes, explain)
        }
        Commands::Scan { path, header_bytes } => commands::scan::run(&ctx, &path, header_bytes),
        Commands::Transform { code } => commands::transform::run(&ctx, code),
        Commands::Metadata { path } => commands::metadata::run(&ctx, &path),
        Commands::Config => commands::config::run(&ctx),
    };

    tracing::debug!(metrics = %metrics().export_json(), "Run complete");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err, json),
    }
}

fn init_logging(verbose: u8, config: &Config) -> anyhow::Result<()> {
    let telemetry = TelemetryConfig {
        log_level: level_for_verbosity(verbose, &config.schema.log.level),
        log_file: config.schema.log.file.clone(),
        ..TelemetryConfig::default()
    };
    keepsake_telemetry::init_with_config(telemetry).context("Failed to initialize logging")
}

fn fail(err: &Error, json: bool) -> ExitCode {
    tracing::debug!(code = %err.code, error = %err.message, "Command failed");
    if json {
        match serde_json::to_string_pretty(&err.to_report()) {
            Ok(report) => eprintln!("{}", report),
            Err(_) => Status::error(&err.to_string()),
        }
    } else {
        Status::error(&err.to_string());
    }
    ExitCode::from(u8::try_from(err.code.exit_code()).unwrap_or(1))
}
