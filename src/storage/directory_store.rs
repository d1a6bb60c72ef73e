use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use spdlog::{debug, trace};

use crate::content::{ContentType, Lang};
use crate::error::{Result, StoreError};
use crate::storage::path_convention::PathConvention;
use crate::storage::{ContentFs, EntryKind, LocalFs};

/// Levels of numeric directories under a type directory: year, month, day
pub const SEARCH_DEPTH: usize = 3;

/// All filesystem access of the content store
pub struct DirectoryStore<F: ContentFs = LocalFs> {
    fs: F,
    paths: PathConvention,
}

impl DirectoryStore<LocalFs> {
    pub fn local(paths: PathConvention) -> Self {
        Self::new(LocalFs, paths)
    }
}

impl<F: ContentFs> DirectoryStore<F> {
    pub fn new(fs: F, paths: PathConvention) -> Self {
        Self { fs, paths }
    }

    pub fn paths(&self) -> &PathConvention {
        &self.paths
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.fs.is_file(path)
    }

    pub fn read_text(&self, path: &Path) -> Result<String> {
        self.fs.read_to_string(path)
            .map_err(|e| StoreError::io(format!("Can't read content from file {}", path.display()), e))
    }

    pub fn exact_lookup(&self, lang: Lang, content_type: ContentType, date: &str, normalized_title: &str) -> Result<String> {
        // Date tokens become directories; anything that is not a plain name
        // would leave the type directory.
        if !date.split('-').all(is_plain_segment) {
            debug!("Rejecting date {} for {}", date, normalized_title);
            return Err(StoreError::NotFound(normalized_title.to_string()));
        }

        let path = self.paths.exact_path(lang, content_type, date, normalized_title);
        if !self.exists(&path) {
            debug!("No content file at {}", path.display());
            return Err(StoreError::NotFound(normalized_title.to_string()));
        }

        self.read_text(&path)
    }

    /// Up to `limit` content files under `base`, newest first.
    ///
    /// Directories above the leaf level are visited in descending numeric
    /// order of their names, and the walk stops once `limit` files are
    /// collected. Only files inside a single leaf directory are compared by
    /// creation time.
    pub fn recent_files(&self, base: &Path, depth: usize, limit: usize) -> Result<Vec<PathBuf>> {
        debug!("Looking for {} recent files under {}", limit, base.display());
        let mut last_created = Vec::with_capacity(limit);
        self.collect_recent(base, depth, limit, &mut last_created)?;
        Ok(last_created)
    }

    fn collect_recent(&self, dir: &Path, depth: usize, limit: usize, last_created: &mut Vec<PathBuf>) -> Result<()> {
        if last_created.len() >= limit {
            return Ok(());
        }

        if depth > 0 {
            for sub_dir in self.sorted_dirs(dir)? {
                self.collect_recent(&sub_dir, depth - 1, limit, last_created)?;
                if last_created.len() >= limit {
                    break;
                }
            }
        } else {
            let remaining = limit - last_created.len();
            let files = self.sorted_files(dir)?;
            trace!("{} content files in {}, taking up to {}", files.len(), dir.display(), remaining);
            last_created.extend(files.into_iter().take(remaining));
        }

        Ok(())
    }

    /// Sub directories of `dir`, highest number first
    fn sorted_dirs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = self.fs.list_dir(dir)
            .map_err(|e| StoreError::io(format!("Can't get directories from path {}", dir.display()), e))?;

        let mut numbered = vec![];
        for entry in entries {
            if entry.kind != EntryKind::Dir {
                continue;
            }
            let number = entry.file_name()
                .and_then(|name| name.parse::<i32>().ok())
                .ok_or_else(|| StoreError::MalformedLayout {
                    dir: dir.to_path_buf(),
                    name: entry.path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default(),
                })?;
            numbered.push((number, entry.path));
        }

        numbered.sort_by(|(a, _), (b, _)| b.cmp(a));
        Ok(numbered.into_iter().map(|(_, path)| path).collect())
    }

    /// Content files of `dir`, most recently created first
    fn sorted_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = self.fs.list_dir(dir)
            .map_err(|e| StoreError::io(format!("Can't get files from path {}", dir.display()), e))?;

        let mut files: Vec<(SystemTime, PathBuf)> = vec![];
        for entry in entries {
            if entry.kind != EntryKind::File {
                continue;
            }
            match entry.file_name() {
                Some(name) if name.ends_with(self.paths.suffix()) => {}
                _ => continue,
            }
            let created = self.fs.created(&entry.path)
                .map_err(|e| StoreError::io(format!("Can't read creation time from {}", entry.path.display()), e))?;
            files.push((created, entry.path));
        }

        // Stable: equal times keep listing order
        files.sort_by(|(a, _), (b, _)| b.cmp(a));
        Ok(files.into_iter().map(|(_, path)| path).collect())
    }

    pub fn storage_root_exists(&self) -> bool {
        self.fs.exists(self.paths.root())
    }

    pub fn usable_space_mb(&self) -> Result<u64> {
        let root = self.paths.root();
        self.fs.available_space(root)
            .map(|bytes| bytes / 1024 / 1024)
            .map_err(|e| StoreError::io(format!("Cannot fetch size information from {}", root.display()), e))
    }
}

fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (None, None) => true,
        (Some(Component::Normal(_)), None) => true,
        _ => false,
    }
}
