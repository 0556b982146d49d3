// Memory archive - Assets held in a map keyed by logical path

use super::{path_components, Archive, ArchiveError, ArchiveStream};
use std::collections::HashMap;

/// In-memory archive
///
/// Keys are normalised to upper case with '/' separators, so lookups follow
/// the same case-insensitive rules as the on-disk sources.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryArchive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, logical_path: &str, bytes: Vec<u8>) {
        self.entries.insert(normalize(logical_path), bytes);
    }

    /// Builder-style variant of [`MemoryArchive::insert`]
    pub fn with_entry(mut self, logical_path: &str, bytes: Vec<u8>) -> Self {
        self.insert(logical_path, bytes);
        self
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Archive for MemoryArchive {
    fn open_for_read(&self, logical_path: &str) -> Result<ArchiveStream, ArchiveError> {
        self.entries
            .get(&normalize(logical_path))
            .map(|bytes| ArchiveStream::from_bytes(logical_path, bytes.clone()))
            .ok_or_else(|| ArchiveError::NotFound(logical_path.to_string()))
    }

    fn contains(&self, logical_path: &str) -> bool {
        self.entries.contains_key(&normalize(logical_path))
    }
}

fn normalize(logical_path: &str) -> String {
    path_components(logical_path)
        .map(|part| part.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_open() {
        let archive = MemoryArchive::new().with_entry("ufograph/cursor.dat", vec![9; 4]);
        assert_eq!(archive.len(), 1);

        let mut stream = archive.open_for_read("/UFOGRAPH/CURSOR.DAT").unwrap();
        assert_eq!(stream.len(), 4);
        assert_eq!(stream.read_bytes(4).unwrap(), vec![9; 4]);
    }

    #[test]
    fn test_not_found() {
        let archive = MemoryArchive::new();
        assert!(archive.is_empty());
        assert!(matches!(
            archive.open_for_read("GEODATA/PALETTES.DAT"),
            Err(ArchiveError::NotFound(path)) if path == "GEODATA/PALETTES.DAT"
        ));
    }
}
