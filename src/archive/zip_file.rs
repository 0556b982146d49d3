// Zip archive - Serves assets from a zipped copy of the game data
//
// The container is reopened for every request and the entry is inflated
// into memory, so no zip handle outlives open_for_read.

use super::{path_components, Archive, ArchiveError, ArchiveStream};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Archive backed by a zip file
#[derive(Debug, Clone)]
pub struct ZipArchiveSource {
    zip_path: PathBuf,
    entry_count: usize,
}

impl ZipArchiveSource {
    /// Open `zip_path` and check that it is a readable zip container
    pub fn open<P: AsRef<Path>>(zip_path: P) -> Result<Self, ArchiveError> {
        let zip_path = zip_path.as_ref().to_path_buf();
        let archive = Self::open_container(&zip_path)?;

        log::info!(
            "Opened zip archive {:?} ({} entries)",
            zip_path,
            archive.len()
        );

        Ok(Self {
            entry_count: archive.len(),
            zip_path,
        })
    }

    /// Path of the zip file on disk
    pub fn zip_path(&self) -> &Path {
        &self.zip_path
    }

    /// Number of entries (files and directories) in the container
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    fn open_container(zip_path: &Path) -> Result<ZipArchive<BufReader<File>>, ArchiveError> {
        let file = File::open(zip_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                ArchiveError::NotFound(zip_path.display().to_string())
            }
            _ => ArchiveError::Io(e),
        })?;
        Ok(ZipArchive::new(BufReader::new(file))?)
    }
}

impl Archive for ZipArchiveSource {
    fn open_for_read(&self, logical_path: &str) -> Result<ArchiveStream, ArchiveError> {
        let mut archive = Self::open_container(&self.zip_path)?;

        let wanted: Vec<&str> = path_components(logical_path).collect();
        let entry_name = archive
            .file_names()
            .find(|name| {
                let parts: Vec<&str> = path_components(name).collect();
                !name.ends_with('/')
                    && parts.len() == wanted.len()
                    && parts
                        .iter()
                        .zip(&wanted)
                        .all(|(a, b)| a.eq_ignore_ascii_case(b))
            })
            .map(str::to_string);

        let Some(entry_name) = entry_name else {
            log::warn!("{} not found in {:?}", logical_path, self.zip_path);
            return Err(ArchiveError::NotFound(logical_path.to_string()));
        };

        let mut entry = archive.by_name(&entry_name)?;
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        log::debug!(
            "Read {} from {:?} ({} bytes)",
            entry_name,
            self.zip_path,
            bytes.len()
        );

        Ok(ArchiveStream::from_bytes(logical_path, bytes))
    }
}
