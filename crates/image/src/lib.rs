//! Image orientation utilities for the keepsake gallery.
//!
//! This crate provides:
//! - EXIF orientation extraction from JPEG headers
//! - Mapping from orientation codes to display transforms (CSS)
//! - Header-prefix reading and JPEG metadata
//! - Batch scanning with optional parallelism
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use keepsake_image::{read_orientation, DisplayTransform, Orientation};
//!
//! let jpeg = [
//!     0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x22, b'E', b'x', b'i', b'f', 0, 0,
//!     b'I', b'I', 0x2A, 0, 8, 0, 0, 0,
//!     1, 0, 0x12, 0x01, 3, 0, 1, 0, 0, 0, 6, 0, 0, 0,
//!     0, 0, 0, 0,
//! ];
//!
//! let orientation = read_orientation(&jpeg);
//! assert_eq!(orientation, Some(Orientation::Rotate90));
//! assert_eq!(DisplayTransform::for_code(orientation).css(), "rotate(90deg)");
//! ```

#![warn(missing_docs)]

pub mod batch;
mod error;
mod exif;
pub mod header;
mod metadata;
mod orientation;

#[cfg(feature = "wasm")]
mod wasm;

pub use batch::{scan_files, summarize, ScanResult, ScanSummary};
pub use error::{ExifError, ExifErrorCode, ImageError, Result};
pub use exif::{inspect_orientation, read_orientation, read_orientation_tag, ORIENTATION_TAG};
pub use header::{read_header, read_header_from_path, DEFAULT_HEADER_BYTES};
pub use metadata::{extract_metadata, ImageMetadata};
pub use orientation::{DisplayTransform, Orientation};
