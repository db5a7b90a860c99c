//! JPEG metadata extraction.

use crate::{read_orientation, DisplayTransform, Orientation};
use serde::{Deserialize, Serialize};

/// Image metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Stored width in pixels
    pub width: u32,
    /// Stored height in pixels
    pub height: u32,
    /// EXIF orientation, `None` when unknown
    pub orientation: Option<Orientation>,
    /// Size of the data that was inspected, in bytes
    pub size_bytes: usize,
}

impl ImageMetadata {
    /// Transform that shows the image upright.
    pub fn display_transform(&self) -> DisplayTransform {
        DisplayTransform::for_code(self.orientation)
    }

    /// Width and height as displayed after the orientation is applied.
    pub fn display_dimensions(&self) -> (u32, u32) {
        if self.display_transform().swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Displayed aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.display_dimensions();
        w as f64 / h as f64
    }

    /// Check if the displayed image is landscape.
    pub fn is_landscape(&self) -> bool {
        let (w, h) = self.display_dimensions();
        w > h
    }

    /// Check if the displayed image is portrait.
    pub fn is_portrait(&self) -> bool {
        let (w, h) = self.display_dimensions();
        h > w
    }

    /// Check if image is square.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// Extract metadata from JPEG data.
///
/// Returns `None` for anything that is not a JPEG or has no reachable
/// start-of-frame segment within `data`.
pub fn extract_metadata(data: &[u8]) -> Option<ImageMetadata> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let (width, height) = extract_jpeg_dimensions(data)?;

    Some(ImageMetadata {
        width,
        height,
        orientation: read_orientation(data),
        size_bytes: data.len(),
    })
}

/// Read dimensions from the first SOF segment.
fn extract_jpeg_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let be_u16 = |at: usize| -> Option<u16> {
        let bytes = data.get(at..at.checked_add(2)?)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    };

    // Skip SOI
    let mut i = 2;

    while i + 1 < data.len() {
        if data[i] != 0xFF {
            return None;
        }

        let marker = data[i + 1];

        // Fill bytes
        if marker == 0xFF {
            i += 1;
            continue;
        }

        // Standalone markers carry no length
        if marker == 0x01 || marker == 0xD8 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }

        // EOI or start of scan: no frame header ahead
        if marker == 0xD9 || marker == 0xDA {
            return None;
        }

        // SOF markers contain dimensions (C4 DHT, C8 JPG, CC DAC excluded)
        if matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF) {
            let height = be_u16(i + 5)?;
            let width = be_u16(i + 7)?;
            return Some((u32::from(width), u32::from(height)));
        }

        let length = be_u16(i + 2)?;
        i += 2 + usize::from(length);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// SOI, optional APP1 Exif with orientation, SOF0 with the given size.
    fn jpeg(width: u16, height: u16, orientation: Option<u16>) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];
        if let Some(value) = orientation {
            data.extend_from_slice(&[0xFF, 0xE1, 0x00, 0x22]);
            data.extend_from_slice(b"Exif\0\0MM\0\x2A\0\0\0\x08\0\x01");
            data.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0, 0, 0, 1]);
            data.extend_from_slice(&value.to_be_bytes());
            data.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        }
        data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&[0x03, 1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1]);
        data.extend_from_slice(&[0xFF, 0xD9]);
        data
    }

    #[test]
    fn test_dimensions_without_exif() {
        let meta = extract_metadata(&jpeg(1920, 1080, None)).unwrap();
        assert_eq!((meta.width, meta.height), (1920, 1080));
        assert_eq!(meta.orientation, None);
        assert!(meta.is_landscape());
        assert!((meta.aspect_ratio() - 16.0 / 9.0).abs() < 0.01);
    }

    #[test]
    fn test_rotated_display_dimensions() {
        let meta = extract_metadata(&jpeg(4032, 3024, Some(6))).unwrap();
        assert_eq!(meta.orientation, Some(Orientation::Rotate90));
        assert_eq!(meta.display_dimensions(), (3024, 4032));
        assert!(meta.is_portrait());
        assert!(!meta.is_landscape());
    }

    #[test]
    fn test_upside_down_keeps_dimensions() {
        let meta = extract_metadata(&jpeg(800, 600, Some(3))).unwrap();
        assert_eq!(meta.display_dimensions(), (800, 600));
        assert_eq!(meta.display_transform().css(), "rotate(180deg)");
    }

    #[test]
    fn test_square() {
        let meta = extract_metadata(&jpeg(1000, 1000, Some(8))).unwrap();
        assert!(meta.is_square());
    }

    #[test]
    fn test_not_jpeg() {
        assert!(extract_metadata(b"\x89PNG\r\n\x1a\n").is_none());
        assert!(extract_metadata(&[]).is_none());
    }

    #[test]
    fn test_truncated_frame_header() {
        let data = jpeg(640, 480, None);
        assert!(extract_metadata(&data[..6]).is_none());
    }
}
