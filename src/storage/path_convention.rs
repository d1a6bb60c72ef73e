use std::path::{Path, PathBuf};

use crate::content::{ContentType, Lang};

/// Maps content coordinates to locations under the storage root:
/// `<root>/<lang>/<type dir>/<date segments...>/<title><suffix>`
#[derive(Debug, Clone)]
pub struct PathConvention {
    root: PathBuf,
    suffix: String,
}

impl PathConvention {
    pub fn new(root: impl Into<PathBuf>, suffix: &str) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn base_path(&self, lang: Lang, content_type: ContentType) -> PathBuf {
        self.root.join(lang.name()).join(content_type.base_dir())
    }

    /// Each `-` separated token of `date` becomes one directory level, as is.
    pub fn exact_path(&self, lang: Lang, content_type: ContentType, date: &str, normalized_title: &str) -> PathBuf {
        let mut path = self.base_path(lang, content_type);
        for segment in date.split('-') {
            path.push(segment);
        }
        path.push(format!("{}{}", normalized_title, self.suffix));
        path
    }
}
