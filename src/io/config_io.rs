use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse dayplan.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

const CONFIG_FILE: &str = "dayplan.toml";

/// Read dayplan.toml from the data directory. A missing file behaves like
/// an empty one: all defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Write the commented default config template, used by `dp init`.
pub fn write_config_template(data_dir: &Path) -> Result<(), ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    fs::write(&path, CONFIG_TEMPLATE)?;
    Ok(())
}

const CONFIG_TEMPLATE: &str = r#"# dayplan configuration

[agenda]
# Days materialized when the agenda opens.
initial_days = 20
# Days added per backward/forward expansion.
expand_step = 5

[filters]
# Which item kinds the agenda shows by default.
tasks = true
events = true
"#;
