use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::content::{ContentType, Lang};

#[derive(Deserialize)]
pub struct Storage {
    pub root_dir: PathBuf,
    #[serde(default = "default_separator")]
    pub title_separator: String,
    #[serde(default = "default_content_suffix")]
    pub content_suffix: String,
}

/// Values used when a request leaves them out
#[derive(Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub lang: Lang,
    pub content_type: ContentType,
    pub max_limit: usize,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

/// Liveness probe settings. The initial post is expected to always exist.
#[derive(Deserialize)]
#[serde(default)]
pub struct Health {
    pub minimum_storage_space_mb: u64,
    pub initial_lang: Lang,
    pub initial_date: String,
    pub initial_title: String,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Metrics {
    pub location: Option<PathBuf>,
    pub time_slot_secs: Option<u64>,
}

#[derive(Deserialize)]
pub struct Config {
    pub storage: Storage,
    #[serde(default)]
    pub defaults: Defaults,
    pub server: Server,
    #[serde(default)]
    pub health: Health,
    pub log: Option<Log>,
    pub metrics: Option<Metrics>,
}

fn default_separator() -> String {
    "-".to_string()
}

fn default_content_suffix() -> String {
    ".json".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            lang: Lang::Ru,
            content_type: ContentType::Post,
            max_limit: 10,
        }
    }
}

impl Default for Health {
    fn default() -> Self {
        Self {
            minimum_storage_space_mb: 50,
            initial_lang: Lang::Ru,
            initial_date: "2016-1-1".to_string(),
            initial_title: "JavaNerd blog".to_string(),
        }
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe()?;
        let exe_dir = cur_exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(expand_exe_dir(&path, exe_dir))
    } else {
        Ok(path)
    }
}

fn expand_exe_dir(path: &Path, exe_dir: &Path) -> PathBuf {
    let str_path = path.to_string_lossy();
    PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    toml::from_str::<Config>(cfg_content).map_err(|e| io::Error::new(
        ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e)))
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg = parse_config(&cfg_content)?;
    cfg.storage.root_dir = parse_path(cfg.storage.root_dir)?;
    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path).transpose()?;
    }
    if let Some(ref mut metrics) = cfg.metrics {
        metrics.location = metrics.location.take().map(parse_path).transpose()?;
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CFG: &str = r##"
[storage]
root_dir = "/var/lib/content"
title_separator = "_"

[defaults]
lang = "en"
content_type = "ARTICLE"
max_limit = 5

[server]
address = "127.0.0.1"
port = 8080

[health]
minimum_storage_space_mb = 100
initial_lang = "en"
initial_date = "2020-2-2"
initial_title = "Hello"

[log]
level = "Debug"
log_to_console = true

[metrics]
time_slot_secs = 30
"##;

    #[test]
    fn test_full_config() {
        let cfg = parse_config(FULL_CFG).unwrap();
        assert_eq!(cfg.storage.root_dir, PathBuf::from("/var/lib/content"));
        assert_eq!(cfg.storage.title_separator, "_");
        assert_eq!(cfg.storage.content_suffix, ".json");
        assert_eq!(cfg.defaults.lang, Lang::En);
        assert_eq!(cfg.defaults.content_type, ContentType::Article);
        assert_eq!(cfg.defaults.max_limit, 5);
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.health.minimum_storage_space_mb, 100);
        assert_eq!(cfg.health.initial_title, "Hello");
        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert!(log.location.is_none());
        assert_eq!(cfg.metrics.unwrap().time_slot_secs, Some(30));
    }

    #[test]
    fn test_minimal_config() {
        let toml_str = r##"
[storage]
root_dir = "storage"

[server]
address = "0.0.0.0"
port = 8001
"##;
        let cfg = parse_config(toml_str).unwrap();
        assert_eq!(cfg.storage.title_separator, "-");
        assert_eq!(cfg.defaults.lang, Lang::Ru);
        assert_eq!(cfg.defaults.content_type, ContentType::Post);
        assert_eq!(cfg.defaults.max_limit, 10);
        assert_eq!(cfg.health.minimum_storage_space_mb, 50);
        assert_eq!(cfg.health.initial_date, "2016-1-1");
        assert_eq!(cfg.health.initial_title, "JavaNerd blog");
        assert!(cfg.log.is_none());
        assert!(cfg.metrics.is_none());
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[server]\nport = 1").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_expand_exe_dir() {
        let path = expand_exe_dir(Path::new("${exe_dir}/storage"), Path::new("/opt/content"));
        assert_eq!(path, PathBuf::from("/opt/content/storage"));
    }

    #[test]
    fn test_read_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("content-store.toml");
        fs::write(&cfg_path, FULL_CFG).unwrap();
        let cfg = read_config(&cfg_path).unwrap();
        assert_eq!(cfg.server.address, "127.0.0.1");

        let err = read_config(&dir.path().join("missing.toml")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
