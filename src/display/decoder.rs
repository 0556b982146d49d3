// Indexed frame decoder - Splits a headerless record stream into rasters
//
// Legacy sprite sheets are a flat run of fixed-size records, one per frame,
// each a row-major grid of one-byte palette indices. There is no header,
// no padding, and no byte order to worry about.
//
// Cursor sheets use 24×24 records (576 bytes).

use super::raster::IndexedRaster;
use crate::archive::{Archive, ArchiveError};
use std::io::{self, Read};

/// Geometry of one frame record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub width: usize,
    pub height: usize,
}

impl FrameLayout {
    /// Create a layout
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Bytes per record
    pub const fn record_size(&self) -> usize {
        self.width * self.height
    }
}

/// Layout of the cursor sprite sheet
pub const CURSOR_LAYOUT: FrameLayout = FrameLayout::new(24, 24);

/// Decode every complete record from `reader`
///
/// # Arguments
/// * `reader` - Source positioned at the first record
/// * `stream_len` - Declared length of the source in bytes
/// * `layout` - Record geometry
///
/// # Returns
/// One raster per complete record, in stream order. A trailing partial
/// record is dropped without being read.
pub fn decode_frames<R: Read>(
    reader: &mut R,
    stream_len: u64,
    layout: FrameLayout,
) -> io::Result<Vec<IndexedRaster>> {
    let record_size = layout.record_size();
    if record_size == 0 {
        return Ok(Vec::new());
    }

    let frame_count = (stream_len / record_size as u64) as usize;
    let trailing = stream_len % record_size as u64;
    if trailing != 0 {
        log::debug!(
            "Dropping {} trailing bytes (partial {}×{} record)",
            trailing,
            layout.width,
            layout.height
        );
    }

    let mut frames = Vec::with_capacity(frame_count);
    for _ in 0..frame_count {
        let mut record = vec![0u8; record_size];
        reader.read_exact(&mut record)?;
        frames.push(IndexedRaster::new(layout.width, layout.height, record));
    }

    Ok(frames)
}

/// Open `path` in `archive` and decode its records
///
/// The stream is dropped before returning, whether decoding succeeded or not.
pub fn decode_archive_frames(
    archive: &dyn Archive,
    path: &str,
    layout: FrameLayout,
) -> Result<Vec<IndexedRaster>, ArchiveError> {
    let mut stream = archive.open_for_read(path)?;
    let len = stream.len();
    let frames = decode_frames(&mut stream, len, layout)?;

    log::debug!("Decoded {} frames from {}", frames.len(), path);
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;

    fn records(count: usize, extra: usize) -> Vec<u8> {
        let size = CURSOR_LAYOUT.record_size();
        let mut bytes: Vec<u8> = (0..count * size).map(|i| (i / size) as u8).collect();
        bytes.extend(std::iter::repeat(0xEE).take(extra));
        bytes
    }

    #[test]
    fn test_cursor_record_size() {
        assert_eq!(CURSOR_LAYOUT.record_size(), 576);
    }

    #[test]
    fn test_exact_multiple() {
        for count in [0, 1, 9] {
            let bytes = records(count, 0);
            let frames =
                decode_frames(&mut bytes.as_slice(), bytes.len() as u64, CURSOR_LAYOUT).unwrap();
            assert_eq!(frames.len(), bytes.len() / 576);
        }
    }

    #[test]
    fn test_trailing_partial_record_dropped() {
        for extra in [1, 300, 575] {
            let bytes = records(3, extra);
            let frames =
                decode_frames(&mut bytes.as_slice(), bytes.len() as u64, CURSOR_LAYOUT).unwrap();
            assert_eq!(frames.len(), 3);
        }
    }

    #[test]
    fn test_frame_order_follows_stream() {
        let bytes = records(4, 0);
        let frames =
            decode_frames(&mut bytes.as_slice(), bytes.len() as u64, CURSOR_LAYOUT).unwrap();

        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.width(), 24);
            assert_eq!(frame.height(), 24);
            assert!(frame.as_slice().iter().all(|&b| b == i as u8));
        }
    }

    #[test]
    fn test_row_major_layout() {
        let layout = FrameLayout::new(3, 2);
        let bytes = [10u8, 11, 12, 20, 21, 22];
        let frames = decode_frames(&mut bytes.as_slice(), 6, layout).unwrap();

        assert_eq!(frames[0].index_at(2, 0), 12);
        assert_eq!(frames[0].index_at(0, 1), 20);
    }

    #[test]
    fn test_short_reader_is_an_error() {
        // Declared length claims two records but only one is present
        let bytes = records(1, 0);
        let result = decode_frames(&mut bytes.as_slice(), 2 * 576, CURSOR_LAYOUT);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_archive_frames() {
        let archive = MemoryArchive::new().with_entry("UFOGRAPH/CURSOR.DAT", records(2, 10));

        let frames = decode_archive_frames(&archive, "UFOGRAPH/CURSOR.DAT", CURSOR_LAYOUT).unwrap();
        assert_eq!(frames.len(), 2);

        assert!(matches!(
            decode_archive_frames(&archive, "UFOGRAPH/NOPE.DAT", CURSOR_LAYOUT),
            Err(ArchiveError::NotFound(_))
        ));
    }
}
