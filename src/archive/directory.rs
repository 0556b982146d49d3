// Directory archive - Serves assets from an unpacked game directory
//
// Original game media was authored on case-insensitive filesystems, so
// installs copied to other systems often mix upper and lower case.
// Each path component is matched exactly first, then case-insensitively.

use super::{path_components, Archive, ArchiveError, ArchiveStream};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Archive backed by a directory on disk
#[derive(Debug, Clone)]
pub struct DirArchive {
    root: PathBuf,
}

impl DirArchive {
    /// Use `root` as the archive root
    ///
    /// # Returns
    /// `ArchiveError::NotFound` if `root` is not an existing directory
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, ArchiveError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ArchiveError::NotFound(root.display().to_string()));
        }

        log::debug!("Opened directory archive {}", root.display());
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Root directory of this archive
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a logical path to a file on disk
    fn resolve(&self, logical_path: &str) -> Option<PathBuf> {
        let mut current = self.root.clone();

        for part in path_components(logical_path) {
            let exact = current.join(part);
            if exact.exists() {
                current = exact;
                continue;
            }

            let entry = fs::read_dir(&current).ok()?.flatten().find(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.eq_ignore_ascii_case(part))
            })?;
            current = entry.path();
        }

        current.is_file().then_some(current)
    }
}

impl Archive for DirArchive {
    fn open_for_read(&self, logical_path: &str) -> Result<ArchiveStream, ArchiveError> {
        let Some(path) = self.resolve(logical_path) else {
            log::warn!(
                "{} not found under {}",
                logical_path,
                self.root.display()
            );
            return Err(ArchiveError::NotFound(logical_path.to_string()));
        };

        let file = File::open(&path)?;
        let len = file.metadata()?.len();
        log::debug!("Opened {} ({} bytes)", path.display(), len);

        Ok(ArchiveStream::new(
            logical_path,
            len,
            Box::new(BufReader::new(file)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn game_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("ufograph")).unwrap();
        fs::write(dir.path().join("ufograph").join("Cursor.dat"), [1, 2, 3]).unwrap();
        dir
    }

    #[test]
    fn test_open_requires_directory() {
        let dir = game_dir();
        assert!(DirArchive::open(dir.path()).is_ok());
        assert!(matches!(
            DirArchive::open(dir.path().join("nope")),
            Err(ArchiveError::NotFound(_))
        ));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let dir = game_dir();
        let archive = DirArchive::open(dir.path()).unwrap();

        let mut stream = archive.open_for_read("UFOGRAPH/CURSOR.DAT").unwrap();
        assert_eq!(stream.len(), 3);

        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_entry() {
        let dir = game_dir();
        let archive = DirArchive::open(dir.path()).unwrap();

        assert!(!archive.contains("UFOGRAPH/MISSING.DAT"));
        // Directories are not entries
        assert!(matches!(
            archive.open_for_read("UFOGRAPH"),
            Err(ArchiveError::NotFound(_))
        ));
    }
}
