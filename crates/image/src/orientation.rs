//! EXIF orientation codes and the display transforms they call for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// EXIF orientation tag value (0x0112).
///
/// Serializes as the bare integer so JSON consumers see `6`, not `"Rotate90"`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Orientation {
    /// Stored upright
    Normal = 1,
    /// Mirrored left to right
    MirrorHorizontal = 2,
    /// Stored upside down
    Rotate180 = 3,
    /// Mirrored top to bottom
    MirrorVertical = 4,
    /// Mirrored across the main diagonal
    Transpose = 5,
    /// Needs a 90° clockwise rotation
    Rotate90 = 6,
    /// Mirrored across the anti-diagonal
    Transverse = 7,
    /// Needs a 90° counter-clockwise rotation
    Rotate270 = 8,
}

impl Orientation {
    /// All orientations, indexed by EXIF value - 1.
    pub const ALL: [Orientation; 8] = [
        Orientation::Normal,
        Orientation::MirrorHorizontal,
        Orientation::Rotate180,
        Orientation::MirrorVertical,
        Orientation::Transpose,
        Orientation::Rotate90,
        Orientation::Transverse,
        Orientation::Rotate270,
    ];

    /// Create from a raw tag value. Returns `None` outside 1..=8.
    pub fn from_exif(value: u16) -> Option<Self> {
        match value {
            1..=8 => Some(Self::ALL[usize::from(value) - 1]),
            _ => None,
        }
    }

    /// The EXIF tag value (1-8).
    pub fn to_exif(self) -> u8 {
        self as u8
    }

    /// Whether the stored image is mirrored.
    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            Orientation::MirrorHorizontal
                | Orientation::MirrorVertical
                | Orientation::Transpose
                | Orientation::Transverse
        )
    }

    /// Whether width and height swap once the image is shown upright.
    pub fn swaps_axes(self) -> bool {
        self.display_transform().swaps_dimensions()
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Orientation::Normal => "normal",
            Orientation::MirrorHorizontal => "mirrored horizontally",
            Orientation::Rotate180 => "upside down",
            Orientation::MirrorVertical => "mirrored vertically",
            Orientation::Transpose => "mirrored, rotated 90° counter-clockwise",
            Orientation::Rotate90 => "rotate 90° clockwise",
            Orientation::Transverse => "mirrored, rotated 90° clockwise",
            Orientation::Rotate270 => "rotate 90° counter-clockwise",
        }
    }

    /// The transform that shows this image upright.
    pub fn display_transform(self) -> DisplayTransform {
        let (degrees, mirror) = match self {
            Orientation::Normal => (0, false),
            Orientation::MirrorHorizontal => (0, true),
            Orientation::Rotate180 => (180, false),
            Orientation::MirrorVertical => (180, true),
            Orientation::Transpose => (-90, true),
            Orientation::Rotate90 => (90, false),
            Orientation::Transverse => (90, true),
            Orientation::Rotate270 => (-90, false),
        };
        DisplayTransform { degrees, mirror }
    }
}

impl TryFrom<u16> for Orientation {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_exif(value).ok_or_else(|| format!("invalid EXIF orientation {}", value))
    }
}

impl From<Orientation> for u16 {
    fn from(o: Orientation) -> Self {
        u16::from(o.to_exif())
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_exif(), self.description())
    }
}

/// Rotation and mirror a viewer applies to show an image upright.
///
/// The mirror is applied first, then the rotation, which is the order CSS
/// evaluates `rotate(..) scaleX(-1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DisplayTransform {
    degrees: i16,
    mirror: bool,
}

impl DisplayTransform {
    /// No rotation, no mirror.
    pub const IDENTITY: Self = Self { degrees: 0, mirror: false };

    /// Transform for an extractor result. Unknown shows the image as stored.
    pub fn for_code(orientation: Option<Orientation>) -> Self {
        orientation.map_or(Self::IDENTITY, Orientation::display_transform)
    }

    /// Clockwise rotation in degrees: 0, 90, 180 or -90.
    pub fn degrees(&self) -> i16 {
        self.degrees
    }

    /// Whether a horizontal mirror is applied before rotating.
    pub fn is_mirrored(&self) -> bool {
        self.mirror
    }

    /// Whether this transform leaves the image untouched.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Whether displayed width and height are swapped relative to storage.
    pub fn swaps_dimensions(&self) -> bool {
        self.degrees.abs() == 90
    }

    /// CSS `transform` value.
    pub fn css(&self) -> String {
        match (self.degrees, self.mirror) {
            (0, false) => "none".to_string(),
            (0, true) => "scaleX(-1)".to_string(),
            (deg, false) => format!("rotate({}deg)", deg),
            (deg, true) => format!("rotate({}deg) scaleX(-1)", deg),
        }
    }
}

impl fmt::Display for DisplayTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exif_values() {
        for v in 1..=8u16 {
            let o = Orientation::from_exif(v).unwrap();
            assert_eq!(u16::from(o.to_exif()), v);
        }
        assert!(Orientation::from_exif(0).is_none());
        assert!(Orientation::from_exif(9).is_none());
        assert!(Orientation::from_exif(0xFFFF).is_none());
    }

    #[test]
    fn test_rotation_transforms() {
        assert_eq!(Orientation::Normal.display_transform().css(), "none");
        assert_eq!(Orientation::Rotate180.display_transform().css(), "rotate(180deg)");
        assert_eq!(Orientation::Rotate90.display_transform().css(), "rotate(90deg)");
        assert_eq!(Orientation::Rotate270.display_transform().css(), "rotate(-90deg)");
    }

    #[test]
    fn test_mirrored_transforms() {
        assert_eq!(Orientation::MirrorHorizontal.display_transform().css(), "scaleX(-1)");
        assert_eq!(
            Orientation::MirrorVertical.display_transform().css(),
            "rotate(180deg) scaleX(-1)"
        );
        assert_eq!(
            Orientation::Transpose.display_transform().css(),
            "rotate(-90deg) scaleX(-1)"
        );
        assert_eq!(
            Orientation::Transverse.display_transform().css(),
            "rotate(90deg) scaleX(-1)"
        );
        for o in Orientation::ALL {
            assert_eq!(o.is_mirrored(), o.display_transform().is_mirrored(), "{:?}", o);
        }
    }

    #[test]
    fn test_swaps_axes() {
        let swapped: Vec<u8> = Orientation::ALL
            .iter()
            .filter(|o| o.swaps_axes())
            .map(|o| o.to_exif())
            .collect();
        assert_eq!(swapped, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_unknown_is_identity() {
        let t = DisplayTransform::for_code(None);
        assert!(t.is_identity());
        assert_eq!(t.degrees(), 0);
        assert_eq!(t.to_string(), "none");
    }

    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&Orientation::Rotate90).unwrap();
        assert_eq!(json, "6");

        let back: Orientation = serde_json::from_str("8").unwrap();
        assert_eq!(back, Orientation::Rotate270);

        assert!(serde_json::from_str::<Orientation>("0").is_err());
    }
}
