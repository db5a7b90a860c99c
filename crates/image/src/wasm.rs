//! WASM bindings for the image crate.
//!
//! Lets the gallery page pass the bytes it fetched for a photo and get back
//! the CSS transform to apply to the `<img>` element.

use crate::{extract_metadata, read_orientation, DisplayTransform, Orientation};
use wasm_bindgen::prelude::*;

/// Read the EXIF orientation of JPEG bytes.
///
/// # Returns
/// The orientation code (1-8), or `undefined` when it cannot be determined
#[wasm_bindgen]
pub fn exif_orientation(bytes: &[u8]) -> Option<u8> {
    read_orientation(bytes).map(Orientation::to_exif)
}

/// CSS `transform` value for an orientation code.
///
/// Invalid codes map to `"none"`, the same as an unknown orientation.
#[wasm_bindgen]
pub fn orientation_css(code: u8) -> String {
    DisplayTransform::for_code(Orientation::from_exif(u16::from(code))).css()
}

/// CSS `transform` value read straight from JPEG bytes.
#[wasm_bindgen]
pub fn orientation_css_for_bytes(bytes: &[u8]) -> String {
    DisplayTransform::for_code(read_orientation(bytes)).css()
}

/// Extract JPEG metadata.
///
/// # Returns
/// JSON string with width, height, orientation and display size, or `"null"`
#[wasm_bindgen]
pub fn image_metadata(bytes: &[u8]) -> Result<String, JsValue> {
    match extract_metadata(bytes) {
        Some(meta) => {
            let (display_width, display_height) = meta.display_dimensions();
            let result = serde_json::json!({
                "width": meta.width,
                "height": meta.height,
                "orientation": meta.orientation,
                "display_width": display_width,
                "display_height": display_height,
                "transform": meta.display_transform().css(),
            });
            serde_json::to_string(&result)
                .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
        }
        None => Ok("null".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Big-endian Exif APP1 with orientation 6, then SOF0 of 4032x3024.
    fn portrait_jpeg() -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x22];
        data.extend_from_slice(b"Exif\0\0MM\0\x2A\0\0\0\x08\0\x01");
        data.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0, 0, 0, 1, 0, 6, 0, 0, 0, 0, 0, 0]);
        data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        data.extend_from_slice(&3024u16.to_be_bytes());
        data.extend_from_slice(&4032u16.to_be_bytes());
        data.extend_from_slice(&[3, 1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1]);
        data
    }

    #[test]
    fn test_orientation_css_invalid_codes() {
        assert_eq!(orientation_css(0), "none");
        assert_eq!(orientation_css(9), "none");
        assert_eq!(orientation_css(6), "rotate(90deg)");
        assert_eq!(orientation_css(7), "rotate(90deg) scaleX(-1)");
    }

    #[test]
    fn test_exif_orientation() {
        assert_eq!(exif_orientation(&portrait_jpeg()), Some(6));
        assert_eq!(exif_orientation(&[0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x02]), None);
        assert_eq!(orientation_css_for_bytes(&portrait_jpeg()), "rotate(90deg)");
        assert_eq!(orientation_css_for_bytes(b"\x89PNG"), "none");
    }

    #[test]
    fn test_image_metadata_not_jpeg() {
        assert_eq!(image_metadata(b"\x89PNG").ok().as_deref(), Some("null"));
    }

    #[test]
    fn test_image_metadata_swaps_display_size() {
        let json = image_metadata(&portrait_jpeg()).ok().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["width"], 4032);
        assert_eq!(value["height"], 3024);
        assert_eq!(value["display_width"], 3024);
        assert_eq!(value["display_height"], 4032);
        assert_eq!(value["orientation"], 6);
        assert_eq!(value["transform"], "rotate(90deg)");
    }
}
