//! Error types for the image crate.

use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur while reading image data.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The orientation could not be determined
    #[error("Indeterminate orientation: {0}")]
    Exif(#[from] ExifError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Why an orientation could not be determined.
///
/// Callers of [`read_orientation`](crate::read_orientation) never see these;
/// they collapse to `None`. They are kept for logging and `--explain` output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExifError {
    /// Input does not start with the JPEG SOI marker
    #[error("not a JPEG (missing FF D8 start-of-image marker)")]
    NotJpeg,

    /// Buffer ended before a field could be read
    #[error("buffer truncated at offset {offset}")]
    Truncated {
        /// Offset of the read that ran past the end
        offset: usize,
    },

    /// A marker without the 0xFF prefix was found while walking segments
    #[error("unexpected marker {marker:#06X} at offset {offset}")]
    UnexpectedMarker {
        /// Offset of the marker
        offset: usize,
        /// The two bytes read as a marker
        marker: u16,
    },

    /// Reached the end of the buffer without finding an APP1 segment
    #[error("no APP1 segment before end of data")]
    NoApp1,

    /// APP1 segment does not carry Exif data
    #[error("APP1 segment at offset {offset} is not Exif")]
    NotExif {
        /// Offset of the APP1 marker
        offset: usize,
    },

    /// TIFF header byte order is neither "II" nor "MM"
    #[error("invalid TIFF byte order {0:02X?}")]
    InvalidByteOrder([u8; 2]),

    /// IFD0 was walked without finding tag 0x0112
    #[error("orientation tag absent from {entries} directory entries")]
    TagMissing {
        /// Number of entries scanned
        entries: u16,
    },

    /// Tag 0x0112 held a value outside 1..=8
    #[error("orientation value {0} out of range")]
    InvalidValue(u16),
}

/// Error code for integration with keepsake-core error handling.
/// Range: 11xxx for EXIF errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExifErrorCode {
    /// Not a JPEG
    NotJpeg = 11001,
    /// Truncated buffer
    Truncated = 11002,
    /// Malformed marker stream
    UnexpectedMarker = 11003,
    /// No APP1 segment
    NoApp1 = 11004,
    /// APP1 without Exif
    NotExif = 11005,
    /// Bad TIFF byte order
    InvalidByteOrder = 11006,
    /// Orientation tag missing
    TagMissing = 11007,
    /// Orientation value out of range
    InvalidValue = 11008,
}

impl ExifError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ExifErrorCode {
        match self {
            ExifError::NotJpeg => ExifErrorCode::NotJpeg,
            ExifError::Truncated { .. } => ExifErrorCode::Truncated,
            ExifError::UnexpectedMarker { .. } => ExifErrorCode::UnexpectedMarker,
            ExifError::NoApp1 => ExifErrorCode::NoApp1,
            ExifError::NotExif { .. } => ExifErrorCode::NotExif,
            ExifError::InvalidByteOrder(_) => ExifErrorCode::InvalidByteOrder,
            ExifError::TagMissing { .. } => ExifErrorCode::TagMissing,
            ExifError::InvalidValue(_) => ExifErrorCode::InvalidValue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ExifError::NotJpeg.code() as u32, 11001);
        assert_eq!(ExifError::TagMissing { entries: 3 }.code(), ExifErrorCode::TagMissing);
    }

    #[test]
    fn test_error_messages() {
        let err = ExifError::UnexpectedMarker { offset: 2, marker: 0x1234 };
        assert_eq!(err.to_string(), "unexpected marker 0x1234 at offset 2");

        let err = ImageError::from(ExifError::NotJpeg);
        assert!(err.to_string().starts_with("Indeterminate orientation"));
    }
}
