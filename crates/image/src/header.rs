//! Reading the leading bytes of an image.
//!
//! Orientation lives in the APP1 segment right after SOI, so there is no
//! need to load a whole photo to find it.

use crate::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default number of bytes read per image.
///
/// An APP1 segment is at most 64 KiB, so this covers the usual layout of
/// SOI, optional APP0, then APP1.
pub const DEFAULT_HEADER_BYTES: usize = 64 * 1024;

/// Read at most `limit` bytes from `reader`.
///
/// Short input is not an error; the returned buffer is simply shorter.
pub fn read_header<R: Read>(reader: R, limit: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(limit.min(DEFAULT_HEADER_BYTES));
    reader.take(limit as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Read at most `limit` bytes from the file at `path`.
pub fn read_header_from_path(path: impl AsRef<Path>, limit: usize) -> Result<Vec<u8>> {
    let file = File::open(path.as_ref())?;
    read_header(file, limit)
}
