//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod output;
pub mod scan;
pub mod validate;

use std::path::{Path, PathBuf};

use shelflife_core::models::config::ShelfConfig;
use shelflife_core::LabelInterpreter;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelflife")
        .join("config.json")
}

/// Load configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ShelfConfig> {
    let config = match config_path {
        Some(path) => ShelfConfig::from_file(Path::new(path))?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                ShelfConfig::from_file(&default_path)?
            } else {
                ShelfConfig::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}

/// Build an interpreter from configuration and an optional pinned date.
pub fn build_interpreter(config: &ShelfConfig, today: Option<chrono::NaiveDate>) -> LabelInterpreter {
    let interpreter = LabelInterpreter::new().with_config(config.interpreter.clone());
    match today {
        Some(today) => interpreter.with_today(today),
        None => interpreter,
    }
}
