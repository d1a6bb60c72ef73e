use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod directory_store;
pub mod path_convention;
pub mod title_normalizer;

#[cfg(test)]
pub(crate) mod memory_fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// Filesystem operations the store needs. Every call is a blocking read.
pub trait ContentFs: Send + Sync {
    /// Entries directly under `dir`, in the order the filesystem returns them.
    /// Fails when the metadata of any entry can't be read.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    fn created(&self, path: &Path) -> io::Result<SystemTime>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// True only for regular files
    fn is_file(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;

    /// Bytes available to this process on the filesystem holding `path`
    fn available_space(&self, path: &Path) -> io::Result<u64>;
}

/// Host filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl ContentFs for LocalFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = vec![];
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            // Follows symlinks; a dangling link fails the listing
            let meta = fs::metadata(&path)
                .map_err(|e| io::Error::new(e.kind(), format!("Can't read metadata of {}: {}", path.display(), e)))?;
            let kind = if meta.is_dir() {
                EntryKind::Dir
            } else if meta.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };
            entries.push(DirEntry { path, kind });
        }
        Ok(entries)
    }

    fn created(&self, path: &Path) -> io::Result<SystemTime> {
        let meta = fs::metadata(path)?;
        // Filesystems without birth time report an error here; files in the
        // store are written once, so the modification time stands in for it.
        match meta.created() {
            Ok(created) => Ok(created),
            Err(_) => meta.modified(),
        }
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn available_space(&self, path: &Path) -> io::Result<u64> {
        fs2::available_space(path)
    }
}
