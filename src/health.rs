use serde::Serialize;
use spdlog::warn;

use crate::config;
use crate::content::{ContentType, Lang};
use crate::content_store::ContentStore;
use crate::storage::ContentFs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Up,
    Down,
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        if value { Status::Up } else { Status::Down }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResponse {
    pub name: &'static str,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: Status,
    pub checks: Vec<CheckResponse>,
}

impl HealthReport {
    pub fn is_up(&self) -> bool {
        self.status == Status::Up
    }
}

/// Liveness probes over the storage. Failures never propagate; they only
/// turn a check down.
pub struct LivenessCheck {
    minimum_storage_space_mb: u64,
    initial_lang: Lang,
    initial_date: String,
    initial_title: String,
}

impl LivenessCheck {
    pub fn from_config(health: &config::Health) -> Self {
        Self {
            minimum_storage_space_mb: health.minimum_storage_space_mb,
            initial_lang: health.initial_lang,
            initial_date: health.initial_date.clone(),
            initial_title: health.initial_title.clone(),
        }
    }

    pub fn check<F: ContentFs>(&self, store: &ContentStore<F>) -> HealthReport {
        let checks = vec![
            CheckResponse {
                name: "content-directory-exists",
                status: store.storage_root_exists().into(),
            },
            CheckResponse {
                name: "content-directory-has-space",
                status: self.enough_space(store).into(),
            },
            CheckResponse {
                name: "initial-post-exists",
                status: self.initial_post_exists(store).into(),
            },
        ];

        let status = checks.iter().all(|check| check.status == Status::Up).into();
        HealthReport { status, checks }
    }

    fn enough_space<F: ContentFs>(&self, store: &ContentStore<F>) -> bool {
        match store.usable_space_mb() {
            Ok(space) => space >= self.minimum_storage_space_mb,
            Err(e) => {
                warn!("Liveness: {}", e);
                false
            }
        }
    }

    fn initial_post_exists<F: ContentFs>(&self, store: &ContentStore<F>) -> bool {
        match store.read(self.initial_lang, ContentType::Post, &self.initial_date, &self.initial_title) {
            Ok(content) => content.title.to_lowercase() == self.initial_title.to_lowercase(),
            Err(e) => {
                warn!("Liveness: initial post unavailable: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metrics::NoOpMetrics;
    use crate::storage::directory_store::DirectoryStore;
    use crate::storage::memory_fs::MemoryFs;
    use crate::storage::path_convention::PathConvention;
    use crate::storage::title_normalizer::TitleNormalizer;
    use crate::test_data::{post_json, POST_JSON};

    use super::*;

    fn store(fs: MemoryFs) -> ContentStore<MemoryFs> {
        let storage = DirectoryStore::new(fs, PathConvention::new("/content", ".json"));
        ContentStore::new(TitleNormalizer::default(), storage, Arc::new(NoOpMetrics))
    }

    fn healthy_fs() -> MemoryFs {
        let mut fs = MemoryFs::new();
        fs.add_file("/content/ru/posts/2016/1/1/JavaNerd-blog.json", POST_JSON, 1);
        fs.available_space = Some(100 * 1024 * 1024);
        fs
    }

    fn statuses(report: &HealthReport) -> Vec<(&'static str, Status)> {
        report.checks.iter().map(|c| (c.name, c.status)).collect()
    }

    #[test]
    fn test_all_up() {
        let liveness = LivenessCheck::from_config(&config::Health::default());
        let report = liveness.check(&store(healthy_fs()));
        assert!(report.is_up());
        assert_eq!(statuses(&report), vec![
            ("content-directory-exists", Status::Up),
            ("content-directory-has-space", Status::Up),
            ("initial-post-exists", Status::Up),
        ]);
    }

    #[test]
    fn test_missing_root() {
        let liveness = LivenessCheck::from_config(&config::Health::default());
        let report = liveness.check(&store(MemoryFs::new()));
        assert_eq!(report.status, Status::Down);
        assert_eq!(report.checks[0].status, Status::Down);
        assert_eq!(report.checks[2].status, Status::Down);
    }

    #[test]
    fn test_not_enough_space() {
        let mut fs = healthy_fs();
        fs.available_space = Some(10 * 1024 * 1024);
        let liveness = LivenessCheck::from_config(&config::Health::default());
        let report = liveness.check(&store(fs));
        assert_eq!(report.status, Status::Down);
        assert_eq!(report.checks[1].status, Status::Down);

        let mut fs = healthy_fs();
        fs.available_space = None;
        let report = liveness.check(&store(fs));
        assert_eq!(report.checks[1].status, Status::Down);
    }

    #[test]
    fn test_initial_post_title_mismatch() {
        let mut fs = MemoryFs::new();
        fs.add_file("/content/ru/posts/2016/1/1/JavaNerd-blog.json", &post_json("Another title", "2016-1-1"), 1);
        let liveness = LivenessCheck::from_config(&config::Health::default());
        let report = liveness.check(&store(fs));
        assert_eq!(report.checks[2].status, Status::Down);
    }

    #[test]
    fn test_title_compared_ignoring_case() {
        let health = config::Health {
            initial_title: "javanerd BLOG".to_string(),
            ..config::Health::default()
        };
        let mut fs = healthy_fs();
        fs.add_file("/content/ru/posts/2016/1/1/javanerd-BLOG.json", POST_JSON, 1);
        let report = LivenessCheck::from_config(&health).check(&store(fs));
        assert_eq!(report.checks[2].status, Status::Up);
    }

    #[test]
    fn test_report_json() {
        let liveness = LivenessCheck::from_config(&config::Health::default());
        let report = liveness.check(&store(healthy_fs()));
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.starts_with("{\"status\":\"UP\",\"checks\":["));
        assert!(json.contains("{\"name\":\"initial-post-exists\",\"status\":\"UP\"}"));
    }
}
