//! Configuration file loading

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::PartialOptions;

/// Load a config file
///
/// Relative artifact paths in the file are taken relative to the file's
/// directory.
pub fn load_config(path: &Path) -> Result<PartialOptions> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path)?;

    let mut config: PartialOptions = if format == "TOML" {
        toml::from_str(&content)?
    } else if content.trim().is_empty() {
        PartialOptions::default()
    } else {
        serde_yaml::from_str(&content)?
    };

    if let Some(dir) = path.parent() {
        config.rebase_paths(dir);
    }

    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Find a configuration file in `start_dir` or any of its parents.
///
/// The first match wins, checking names in [`config_file_names`] order at
/// each level.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.is_file() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(PartialOptions, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let config = load_config(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration if one exists.
///
/// A missing file is not an error; a present but unparsable one is.
pub fn load_optional_config(dir: &Path) -> Result<Option<(PartialOptions, PathBuf)>> {
    match load_config_from_dir(dir) {
        Ok(found) => Ok(Some(found)),
        Err(ConfigError::NotFound(_)) => {
            debug!(dir = %dir.display(), "no config found, using flags and environment only");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
