//! EXIF orientation extraction from JPEG headers.
//!
//! Walks the JPEG marker stream up to the first APP1 segment, checks for an
//! Exif payload and scans IFD0 for the orientation tag (0x0112). Only the
//! header region is needed; the scan stops at the first segment it cannot
//! make sense of.
//!
//! ```text
//!  FF D8 | FF Ex len .. | FF E1 len "Exif\0\0" | "II"/"MM" 2A 00 off32 | .. IFD0 ..
//!  SOI     other segs     APP1                   TIFF header (base)
//!
//!  IFD0 @ base+off32:  count16 | tag16 type16 count32 value32 | ...
//!                               '--------- 12 bytes ---------'
//! ```

use crate::error::ExifError;
use crate::Orientation;

/// JPEG start-of-image marker.
const SOI: u16 = 0xFFD8;
/// APP1 segment marker.
const APP1: u16 = 0xFFE1;
/// Exif identifier at the start of the APP1 payload.
const EXIF_ID: &[u8; 4] = b"Exif";
/// Offset of the TIFF header from the APP1 marker (marker, length, "Exif\0\0").
const TIFF_HEADER_OFFSET: usize = 10;
/// Orientation tag in IFD0.
pub const ORIENTATION_TAG: u16 = 0x0112;
/// Size of one IFD entry.
const IFD_ENTRY_LEN: usize = 12;
/// Offset of the value field inside an IFD entry.
const IFD_VALUE_OFFSET: usize = 8;

/// Byte order declared by the TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    /// "II"
    LittleEndian,
    /// "MM"
    BigEndian,
}

impl ByteOrder {
    fn u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }
}

/// Bounds-checked reads over the input buffer.
struct Reader<'a> {
    data: &'a [u8],
}

impl Reader<'_> {
    fn bytes<const N: usize>(&self, offset: usize) -> Result<[u8; N], ExifError> {
        offset
            .checked_add(N)
            .and_then(|end| self.data.get(offset..end))
            .and_then(|s| s.try_into().ok())
            .ok_or(ExifError::Truncated { offset })
    }

    fn be_u16(&self, offset: usize) -> Result<u16, ExifError> {
        self.bytes(offset).map(u16::from_be_bytes)
    }

    fn u16(&self, offset: usize, order: ByteOrder) -> Result<u16, ExifError> {
        self.bytes(offset).map(|b| order.u16(b))
    }

    fn u32(&self, offset: usize, order: ByteOrder) -> Result<u32, ExifError> {
        self.bytes(offset).map(|b| order.u32(b))
    }
}

/// Read the orientation of a JPEG image.
///
/// Returns `None` when no orientation can be determined: not a JPEG, no Exif
/// APP1 segment, no orientation tag, a value outside 1..=8, or any truncated
/// or malformed structure on the way. Never panics.
///
/// # Example
/// ```
/// use keepsake_image::read_orientation;
///
/// assert_eq!(read_orientation(&[0x89, 0x50, 0x4E, 0x47]), None);
/// assert_eq!(read_orientation(&[0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x02]), None);
/// ```
pub fn read_orientation(data: &[u8]) -> Option<Orientation> {
    match inspect_orientation(data) {
        Ok(orientation) => {
            tracing::trace!(orientation = orientation.to_exif(), "orientation found");
            Some(orientation)
        }
        Err(reason) => {
            tracing::debug!(%reason, len = data.len(), "orientation unknown");
            None
        }
    }
}

/// Like [`read_orientation`], but keeps the reason when it fails.
pub fn inspect_orientation(data: &[u8]) -> Result<Orientation, ExifError> {
    let value = read_orientation_tag(data)?;
    Orientation::from_exif(value).ok_or(ExifError::InvalidValue(value))
}

/// Raw value of tag 0x0112, before range validation.
pub fn read_orientation_tag(data: &[u8]) -> Result<u16, ExifError> {
    let reader = Reader { data };

    if reader.be_u16(0).ok() != Some(SOI) {
        return Err(ExifError::NotJpeg);
    }

    let app1 = find_app1(&reader)?;

    if reader.bytes::<4>(app1 + 4)? != *EXIF_ID {
        return Err(ExifError::NotExif { offset: app1 });
    }

    let base = app1 + TIFF_HEADER_OFFSET;
    let order = match &reader.bytes::<2>(base)? {
        b"II" => ByteOrder::LittleEndian,
        b"MM" => ByteOrder::BigEndian,
        other => return Err(ExifError::InvalidByteOrder(*other)),
    };

    let ifd_offset = reader.u32(base + 4, order)?;
    let ifd = usize::try_from(ifd_offset)
        .ok()
        .and_then(|off| base.checked_add(off))
        .ok_or(ExifError::Truncated { offset: base + 4 })?;

    let entries = reader.u16(ifd, order)?;
    tracing::trace!(?order, ifd, entries, "scanning IFD0");

    for i in 0..usize::from(entries) {
        let entry = ifd + 2 + i * IFD_ENTRY_LEN;
        if reader.u16(entry, order)? == ORIENTATION_TAG {
            return reader.u16(entry + IFD_VALUE_OFFSET, order);
        }
    }

    Err(ExifError::TagMissing { entries })
}

/// Walk segments from offset 2 and return the offset of the first APP1 marker.
fn find_app1(reader: &Reader<'_>) -> Result<usize, ExifError> {
    let mut offset = 2;

    while offset < reader.data.len() {
        let marker = reader.be_u16(offset)?;
        if marker == APP1 {
            return Ok(offset);
        }
        if marker & 0xFF00 != 0xFF00 {
            return Err(ExifError::UnexpectedMarker { offset, marker });
        }

        let length = reader.be_u16(offset + 2)?;
        tracing::trace!(offset, marker, length, "skipping segment");
        // Always moves forward by at least the marker itself.
        offset += 2 + usize::from(length);
    }

    Err(ExifError::NoApp1)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// JPEG with a single APP1 Exif segment holding the given IFD0 entries.
    fn jpeg_with_entries(little_endian: bool, entries: &[(u16, u16)]) -> Vec<u8> {
        let u16b = |v: u16| if little_endian { v.to_le_bytes() } else { v.to_be_bytes() };
        let u32b = |v: u32| if little_endian { v.to_le_bytes() } else { v.to_be_bytes() };

        let mut tiff = Vec::new();
        tiff.extend_from_slice(if little_endian { b"II" } else { b"MM" });
        tiff.extend_from_slice(&u16b(0x2A));
        tiff.extend_from_slice(&u32b(8));
        tiff.extend_from_slice(&u16b(entries.len() as u16));
        for &(tag, value) in entries {
            tiff.extend_from_slice(&u16b(tag));
            tiff.extend_from_slice(&u16b(3));
            tiff.extend_from_slice(&u32b(1));
            tiff.extend_from_slice(&u16b(value));
            tiff.extend_from_slice(&[0, 0]);
        }
        tiff.extend_from_slice(&u32b(0));

        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1];
        let len = (2 + 6 + tiff.len()) as u16;
        data.extend_from_slice(&len.to_be_bytes());
        data.extend_from_slice(b"Exif\0\0");
        data.extend_from_slice(&tiff);
        data.extend_from_slice(&[0xFF, 0xD9]);
        data
    }

    #[test]
    fn test_not_jpeg() {
        assert_eq!(read_orientation(b""), None);
        assert_eq!(read_orientation(&[0xFF]), None);
        assert_eq!(read_orientation(b"GIF89a"), None);
        assert_eq!(inspect_orientation(&[0xD8, 0xFF]), Err(ExifError::NotJpeg));
    }

    #[test]
    fn test_rotate90_little_endian() {
        let data = jpeg_with_entries(true, &[(ORIENTATION_TAG, 6)]);
        assert_eq!(read_orientation(&data), Some(Orientation::Rotate90));
    }

    #[test]
    fn test_rotate90_big_endian() {
        let data = jpeg_with_entries(false, &[(ORIENTATION_TAG, 6)]);
        assert_eq!(read_orientation(&data), Some(Orientation::Rotate90));
    }

    #[test]
    fn test_tag_after_other_entries() {
        let data = jpeg_with_entries(false, &[(0x010F, 7), (0x0110, 2), (ORIENTATION_TAG, 8)]);
        assert_eq!(read_orientation(&data), Some(Orientation::Rotate270));
    }

    #[test]
    fn test_first_tag_wins() {
        let data = jpeg_with_entries(true, &[(ORIENTATION_TAG, 3), (ORIENTATION_TAG, 6)]);
        assert_eq!(read_orientation(&data), Some(Orientation::Rotate180));
    }

    #[test]
    fn test_tag_missing() {
        let data = jpeg_with_entries(true, &[(0x010F, 1), (0x0110, 1)]);
        assert_eq!(inspect_orientation(&data), Err(ExifError::TagMissing { entries: 2 }));
        assert_eq!(read_orientation(&data), None);
    }

    #[test]
    fn test_out_of_range_value() {
        let data = jpeg_with_entries(true, &[(ORIENTATION_TAG, 0)]);
        assert_eq!(read_orientation_tag(&data), Ok(0));
        assert_eq!(inspect_orientation(&data), Err(ExifError::InvalidValue(0)));

        let data = jpeg_with_entries(true, &[(ORIENTATION_TAG, 9)]);
        assert_eq!(read_orientation(&data), None);
    }

    #[test]
    fn test_skips_leading_segments() {
        let exif = jpeg_with_entries(true, &[(ORIENTATION_TAG, 3)]);
        let mut data = vec![0xFF, 0xD8];
        // APP0 JFIF, 16 bytes including the length field
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        data.extend_from_slice(b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0");
        data.extend_from_slice(&exif[2..]);
        assert_eq!(read_orientation(&data), Some(Orientation::Rotate180));
    }

    #[test]
    fn test_non_ff_marker_stops() {
        let data = [0xFF, 0xD8, 0x12, 0x34, 0x00, 0x04, 0xFF, 0xE1];
        assert_eq!(
            inspect_orientation(&data),
            Err(ExifError::UnexpectedMarker { offset: 2, marker: 0x1234 })
        );
    }

    #[test]
    fn test_sof_first_is_unknown() {
        let data = [0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x02];
        assert_eq!(inspect_orientation(&data), Err(ExifError::NoApp1));
    }

    #[test]
    fn test_app1_not_exif() {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x20];
        data.extend_from_slice(b"http://ns.adobe.com/xap/1.0/\0");
        assert_eq!(inspect_orientation(&data), Err(ExifError::NotExif { offset: 2 }));
    }

    #[test]
    fn test_invalid_byte_order() {
        let mut data = jpeg_with_entries(true, &[(ORIENTATION_TAG, 6)]);
        data[12] = b'X';
        data[13] = b'X';
        assert_eq!(inspect_orientation(&data), Err(ExifError::InvalidByteOrder(*b"XX")));
    }

    #[test]
    fn test_ifd_offset_out_of_range() {
        let mut data = jpeg_with_entries(true, &[(ORIENTATION_TAG, 6)]);
        data[16..20].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(read_orientation(&data), None);
    }

    #[test]
    fn test_every_truncation_is_unknown() {
        let data = jpeg_with_entries(false, &[(0x010F, 1), (ORIENTATION_TAG, 6)]);
        let value_end = data.len() - 2 - 4 - 2;
        for len in 0..value_end {
            assert_eq!(read_orientation(&data[..len]), None, "truncated at {}", len);
        }
        assert_eq!(read_orientation(&data[..value_end]), Some(Orientation::Rotate90));
    }

    #[test]
    fn test_idempotent() {
        let data = jpeg_with_entries(true, &[(ORIENTATION_TAG, 8)]);
        assert_eq!(read_orientation(&data), read_orientation(&data));
    }
}
