use std::env;
use std::path::PathBuf;

use content_store::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let candidates = [
        exe_dir,
        env::current_dir().ok(),
        dirs::config_dir(),
    ];

    candidates.into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

fn cache_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(env::temp_dir).join("ContentStore")
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err("Could not find content-store configuration".to_string()),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path).map_err(|e| e.to_string())?;

    if let Some(ref mut log) = config.log {
        let location = log.location.take().unwrap_or_else(|| cache_dir().join("log").join("server.log"));
        println!("Log enabled. Files will be written in {}", location.display());
        log.location = Some(location);
    } else {
        println!("Log disabled. Using stdout");
    }

    if let Some(ref mut metrics) = config.metrics {
        let location = metrics.location.take().unwrap_or_else(|| cache_dir().join("metrics").join("metrics.log"));
        println!("Metrics enabled. Files will be written in {}", location.display());
        metrics.location = Some(location);

        let time_slot_secs = metrics.time_slot_secs.unwrap_or(60);
        metrics.time_slot_secs = Some(time_slot_secs);
        println!("Metrics time slot is {} seconds.", time_slot_secs);
    } else {
        println!("Metrics file disabled.");
    }

    Ok(config)
}
