pub mod config_cmd;
pub mod console;
pub mod inspect;
pub mod status;
pub mod transcript;

use std::path::{Path, PathBuf};

use supportdesk_config::AppConfig;

/// The config file in effect: `--config` if given, else the default path.
pub fn config_file(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path)
}

/// Load configuration with environment overrides applied.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let file = config_file(path);
    AppConfig::load_with_env(&file)
        .map_err(|e| format!("Failed to load config: {e}").into())
}
