use std::fs;
use std::io;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[storage]
root_dir = "${exe_dir}/storage"
title_separator = "-"

# Used when a request has no lang or type parameter
[defaults]
lang = "ru"
content_type = "POST"
max_limit = 10

[server]
address = "0.0.0.0"
port = 8080

[health]
minimum_storage_space_mb = 50
initial_lang = "ru"
initial_date = "2016-1-1"
initial_title = "JavaNerd blog"

[log]
level = "Info"
log_to_console = true

[metrics]
time_slot_secs = 60
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, CONFIG_SAMPLE)
}
