//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Image scanning configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Bytes read from the start of each image
    #[serde(default = "default_header_bytes")]
    pub header_bytes: usize,

    /// File extensions treated as images (case-insensitive)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Follow symbolic links while walking directories
    #[serde(default)]
    pub follow_links: bool,

    /// Maximum directory depth, 0 for unlimited
    #[serde(default = "default_max_depth", skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    /// Include dot-files and dot-directories
    #[serde(default)]
    pub include_hidden: bool,

    /// Glob patterns to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            header_bytes: default_header_bytes(),
            extensions: default_extensions(),
            follow_links: false,
            max_depth: default_max_depth(),
            include_hidden: false,
            exclude: Vec::new(),
        }
    }
}

fn default_header_bytes() -> usize {
    64 * 1024
}

fn default_extensions() -> Vec<String> {
    vec!["jpg", "jpeg", "jpe", "jfif"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_max_depth() -> Option<usize> {
    Some(16)
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Colored terminal output
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (RUST_LOG takes precedence)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write logs to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
