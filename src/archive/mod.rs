// Archive module - Read-only access to packed legacy game assets
//
// Assets are addressed by logical, '/'-separated paths such as
// "UFOGRAPH/CURSOR.DAT". An archive resolves a logical path to a byte
// stream of known length. Streams are closed when dropped.
//
// Three sources are provided:
// - DirArchive: an unpacked game directory on disk
// - ZipArchiveSource: a zip file holding the same tree
// - MemoryArchive: an in-memory map, mostly for tests and tools

pub mod directory;
pub mod memory;
pub mod zip_file;

pub use directory::DirArchive;
pub use memory::MemoryArchive;
pub use zip_file::ZipArchiveSource;

use std::fmt;
use std::io::{self, Read};
use std::path::Path;

/// Errors raised while resolving or reading an archive entry
#[derive(Debug)]
pub enum ArchiveError {
    /// No entry exists at the logical path
    NotFound(String),

    /// I/O error while opening or reading
    Io(io::Error),

    /// The zip container itself could not be read
    Zip(zip::result::ZipError),
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::NotFound(path) => write!(f, "Archive entry not found: {}", path),
            ArchiveError::Io(e) => write!(f, "I/O error: {}", e),
            ArchiveError::Zip(e) => write!(f, "Zip error: {}", e),
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArchiveError::NotFound(_) => None,
            ArchiveError::Io(e) => Some(e),
            ArchiveError::Zip(e) => Some(e),
        }
    }
}

impl From<io::Error> for ArchiveError {
    fn from(e: io::Error) -> Self {
        ArchiveError::Io(e)
    }
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(e: zip::result::ZipError) -> Self {
        ArchiveError::Zip(e)
    }
}

/// A virtual filesystem that maps logical paths to byte streams
pub trait Archive {
    /// Open the entry at `logical_path` for reading
    ///
    /// # Returns
    /// The stream, or `ArchiveError::NotFound` if no such entry exists
    fn open_for_read(&self, logical_path: &str) -> Result<ArchiveStream, ArchiveError>;

    /// Whether an entry exists at `logical_path`
    fn contains(&self, logical_path: &str) -> bool {
        self.open_for_read(logical_path).is_ok()
    }
}

/// An open archive entry
///
/// Reads are capped at the declared length, so a source that grows while
/// open can never be read past what was reported at open time.
pub struct ArchiveStream {
    path: String,
    len: u64,
    reader: io::Take<Box<dyn Read>>,
}

impl ArchiveStream {
    /// Wrap a reader whose total length is known up front
    pub fn new(path: impl Into<String>, len: u64, reader: Box<dyn Read>) -> Self {
        Self {
            path: path.into(),
            len,
            reader: reader.take(len),
        }
    }

    /// Build a stream over an owned buffer
    pub fn from_bytes(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        let len = bytes.len() as u64;
        Self::new(path, len, Box::new(io::Cursor::new(bytes)))
    }

    /// Logical path this stream was opened from
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Declared length of the entry in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the entry is zero bytes long
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> u64 {
        self.reader.limit()
    }

    /// Read up to `count` bytes
    ///
    /// Returns fewer than `count` bytes only at the end of the entry.
    pub fn read_bytes(&mut self, count: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(count.min(self.remaining() as usize));
        (&mut self.reader).take(count as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl Read for ArchiveStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for ArchiveStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveStream")
            .field("path", &self.path)
            .field("len", &self.len)
            .field("remaining", &self.remaining())
            .finish()
    }
}

/// Open the archive at `path`
///
/// Files ending in `.zip` are opened as zip containers; anything else is
/// treated as an unpacked game directory.
pub fn open_archive<P: AsRef<Path>>(path: P) -> Result<Box<dyn Archive>, ArchiveError> {
    let path = path.as_ref();
    let is_zip = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));

    if is_zip {
        Ok(Box::new(ZipArchiveSource::open(path)?))
    } else {
        Ok(Box::new(DirArchive::open(path)?))
    }
}

/// Split a logical path into its non-empty components
pub(crate) fn path_components(logical_path: &str) -> impl Iterator<Item = &str> {
    logical_path
        .split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
}
