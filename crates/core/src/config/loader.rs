//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::Path;

/// Smallest header that can hold SOI plus one marker.
const MIN_HEADER_BYTES: usize = 4;

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist; otherwise the standard locations are
    /// searched and defaults are used when none is found.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        let config = Self {
            schema,
            path: config_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    /// Check values that would make scanning meaningless
    pub fn validate(&self) -> Result<()> {
        let scan = &self.schema.scan;

        if scan.header_bytes < MIN_HEADER_BYTES {
            return Err(Error::new(
                ErrorCode::InvalidConfigValue,
                format!(
                    "scan.header_bytes must be at least {}, got {}",
                    MIN_HEADER_BYTES, scan.header_bytes
                ),
            )
            .with_suggestion("Use 65536 to cover a full APP1 segment"));
        }

        if scan.extensions.is_empty() {
            return Err(Error::new(
                ErrorCode::InvalidConfigValue,
                "scan.extensions must not be empty",
            )
            .with_suggestion("Add at least \"jpg\" and \"jpeg\""));
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.schema)
            .map_err(|e| Error::config(format!("Failed to serialize configuration: {}", e)))
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [".keepsake.toml", "keepsake.toml", ".config/keepsake.toml"];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path, e)))?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path, e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.scan.header_bytes, 65536);
        assert_eq!(config.schema.log.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_partial_file() {
        let file = write_config(
            r#"
[scan]
header_bytes = 4096
extensions = ["JPG"]

[output]
format = "json"
"#,
        );
        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.schema.scan.header_bytes, 4096);
        assert_eq!(config.schema.scan.extensions, vec!["JPG"]);
        assert_eq!(config.schema.scan.max_depth, Some(16));
        assert_eq!(config.schema.output.format, OutputFormat::Json);
        assert!(config.schema.output.color);
    }

    #[test]
    fn test_config_explicit_missing_file() {
        let err = Config::load(Some("/nonexistent/keepsake.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_parse_error() {
        let file = write_config("[scan\nheader_bytes = ");
        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_config_rejects_tiny_header() {
        let file = write_config("[scan]\nheader_bytes = 2\n");
        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_config_rejects_empty_extensions() {
        let file = write_config("[scan]\nextensions = []\n");
        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        let parsed: ConfigSchema = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config.schema);
    }
}
