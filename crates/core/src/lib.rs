//! Core utilities for keepsake tools
//!
//! This crate provides shared functionality used by the command line tools:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **File scanning**: Gallery image discovery with filtering
//!
//! # Example
//!
//! ```rust,no_run
//! use keepsake_core::{config::Config, file_scanner::GalleryScanner};
//!
//! let config = Config::load(None).expect("invalid configuration");
//! let photos = GalleryScanner::from_config("photos", &config.schema.scan)
//!     .and_then(|scanner| scanner.scan())
//!     .expect("scan failed");
//! println!("{} photos", photos.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod file_scanner;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, OutputFormat};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::file_scanner::GalleryScanner;
}
