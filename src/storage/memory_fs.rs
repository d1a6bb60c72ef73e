use std::collections::HashSet;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::storage::{ContentFs, DirEntry, EntryKind};

struct Node {
    path: PathBuf,
    kind: EntryKind,
    text: String,
    created: SystemTime,
}

/// In-memory tree for tests. Listing order is insertion order.
pub(crate) struct MemoryFs {
    nodes: Vec<Node>,
    unreadable: HashSet<PathBuf>,
    pub available_space: Option<u64>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self {
            nodes: vec![],
            unreadable: HashSet::new(),
            available_space: Some(1024 * 1024 * 1024),
        }
    }

    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if self.find(path).is_some() {
            return;
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.add_dir(parent);
            }
        }
        self.nodes.push(Node {
            path: path.to_path_buf(),
            kind: EntryKind::Dir,
            text: String::new(),
            created: UNIX_EPOCH,
        });
    }

    /// `created_secs` is the birth time in seconds since the epoch
    pub fn add_file(&mut self, path: impl AsRef<Path>, text: &str, created_secs: u64) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes.push(Node {
            path: path.to_path_buf(),
            kind: EntryKind::File,
            text: text.to_string(),
            created: UNIX_EPOCH + Duration::from_secs(created_secs),
        });
    }

    pub fn add_other(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes.push(Node {
            path: path.to_path_buf(),
            kind: EntryKind::Other,
            text: String::new(),
            created: UNIX_EPOCH,
        });
    }

    pub fn make_unreadable(&mut self, path: impl AsRef<Path>) {
        self.unreadable.insert(path.as_ref().to_path_buf());
    }

    fn find(&self, path: &Path) -> Option<&Node> {
        self.nodes.iter().find(|node| node.path == path)
    }

    fn check_readable(&self, path: &Path) -> io::Result<()> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(ErrorKind::PermissionDenied, format!("{} is unreadable", path.display())));
        }
        Ok(())
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(ErrorKind::NotFound, format!("{} does not exist", path.display()))
}

impl ContentFs for MemoryFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        self.check_readable(dir)?;
        match self.find(dir) {
            Some(node) if node.kind == EntryKind::Dir => {}
            _ => return Err(not_found(dir)),
        }
        Ok(self.nodes.iter()
            .filter(|node| node.path.parent() == Some(dir))
            .map(|node| DirEntry { path: node.path.clone(), kind: node.kind })
            .collect())
    }

    fn created(&self, path: &Path) -> io::Result<SystemTime> {
        self.find(path).map(|node| node.created).ok_or_else(|| not_found(path))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.check_readable(path)?;
        match self.find(path) {
            Some(node) if node.kind == EntryKind::File => Ok(node.text.clone()),
            _ => Err(not_found(path)),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.find(path), Some(node) if node.kind == EntryKind::File)
    }

    fn exists(&self, path: &Path) -> bool {
        self.find(path).is_some()
    }

    fn available_space(&self, path: &Path) -> io::Result<u64> {
        self.available_space.ok_or_else(|| io::Error::new(ErrorKind::Other, format!("No space information for {}", path.display())))
    }
}
