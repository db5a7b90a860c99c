//! CLI command implementations

pub mod config;
pub mod metadata;
pub mod read;
pub mod scan;
pub mod transform;

use keepsake_core::config::Config;
use keepsake_core::{Error, ErrorCode, Result};
use keepsake_image::ImageError;
use std::path::Path;

/// Smallest prefix that can hold SOI plus one marker.
const MIN_HEADER_BYTES: usize = 4;

/// State shared by every command
pub struct Context {
    pub config: Config,
    pub json: bool,
}

impl Context {
    /// Header size from the command line, else from the configuration
    pub fn header_bytes(&self, requested: Option<usize>) -> Result<usize> {
        match requested {
            Some(n) if n < MIN_HEADER_BYTES => Err(Error::validation(format!(
                "--header-bytes must be at least {}, got {}",
                MIN_HEADER_BYTES, n
            ))
            .with_suggestion("Omit --header-bytes to read the first 64 KiB")),
            Some(n) => Ok(n),
            None => Ok(self.config.schema.scan.header_bytes),
        }
    }
}

/// Turn an image-crate error into a user-facing one
pub fn image_error(err: ImageError, path: &Path) -> Error {
    match err {
        ImageError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Error::file_not_found(path).with_source(e)
        }
        ImageError::IoError(e) => {
            Error::from(e).with_context(format!("Reading {}", path.display()))
        }
        ImageError::Exif(e) => Error::new(ErrorCode::InvalidFormat, e.to_string())
            .with_context(path.display().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context {
            config: Config::default(),
            json: false,
        }
    }

    #[test]
    fn test_header_bytes_default() {
        assert_eq!(ctx().header_bytes(None).unwrap(), 64 * 1024);
        assert_eq!(ctx().header_bytes(Some(512)).unwrap(), 512);
    }

    #[test]
    fn test_header_bytes_too_small() {
        let err = ctx().header_bytes(Some(2)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_image_error_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = image_error(ImageError::IoError(io), Path::new("cake.jpg"));
        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert_eq!(err.code.exit_code(), 1);
        assert!(err.message.contains("cake.jpg"));
        assert!(err.suggestion.is_some());
    }
}
