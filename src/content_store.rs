use std::sync::Arc;

use spdlog::{debug, warn};

use crate::config;
use crate::content::{ContentItem, ContentType, Lang};
use crate::error::{Result, StoreError};
use crate::metrics::ContentMetrics;
use crate::storage::directory_store::{DirectoryStore, SEARCH_DEPTH};
use crate::storage::path_convention::PathConvention;
use crate::storage::title_normalizer::TitleNormalizer;
use crate::storage::{ContentFs, LocalFs};

/// Read access to the stored content, by exact coordinates or by recency
pub struct ContentStore<F: ContentFs = LocalFs> {
    normalizer: TitleNormalizer,
    storage: DirectoryStore<F>,
    metrics: Arc<dyn ContentMetrics>,
}

impl ContentStore<LocalFs> {
    pub fn from_config(storage: &config::Storage, metrics: Arc<dyn ContentMetrics>) -> Result<Self> {
        let normalizer = TitleNormalizer::new(&storage.title_separator)?;
        let paths = PathConvention::new(storage.root_dir.clone(), &storage.content_suffix);
        Ok(Self::new(normalizer, DirectoryStore::local(paths), metrics))
    }
}

impl<F: ContentFs> ContentStore<F> {
    pub fn new(normalizer: TitleNormalizer, storage: DirectoryStore<F>, metrics: Arc<dyn ContentMetrics>) -> Self {
        Self {
            normalizer,
            storage,
            metrics,
        }
    }

    pub fn read(&self, lang: Lang, content_type: ContentType, date: &str, title: &str) -> Result<ContentItem> {
        let file_name = self.normalizer.normalize(title);
        let stringified = match self.storage.exact_lookup(lang, content_type, date, &file_name) {
            Ok(stringified) => stringified,
            Err(StoreError::NotFound(_)) => {
                self.metrics.not_found();
                warn!("Content not found. lang={}, type={}, date={}, file={}", lang, content_type, date, file_name);
                return Err(StoreError::NotFound(title.to_string()));
            }
            Err(e) => return Err(e),
        };

        self.metrics.hit(title);
        ContentItem::deserialize(&stringified, content_type, &file_name)
    }

    /// The `limit` newest items of a language and type. Callers bound `limit`.
    pub fn read_recent(&self, lang: Lang, content_type: ContentType, limit: usize) -> Result<Vec<ContentItem>> {
        let base_path = self.storage.paths().base_path(lang, content_type);
        let paths = self.storage.recent_files(&base_path, SEARCH_DEPTH, limit)?;
        debug!("Read {} recent paths for lang={}, type={}", paths.len(), lang, content_type);

        paths.iter()
            .map(|path| {
                let stringified = self.storage.read_text(path)?;
                ContentItem::deserialize(&stringified, content_type, &path.display().to_string())
            })
            .collect()
    }

    pub fn storage_root_exists(&self) -> bool {
        self.storage.storage_root_exists()
    }

    pub fn usable_space_mb(&self) -> Result<u64> {
        self.storage.usable_space_mb()
    }
}
