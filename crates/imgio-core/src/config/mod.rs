//! Dispatcher configuration.
//!
//! Configuration is read from a YAML file. Missing or malformed files never
//! fail: the built-in defaults are used and the reason is recorded as a
//! warning on the returned [`ConfigHandle`].

mod defaults;

#[cfg(test)]
mod tests;

pub use defaults::{FormatToggles, ImageIoConfig, JpegSettings, NetCdfSettings, TiffSettings};

use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "IMGIO_CONFIG";

/// Candidate config file names searched for on disk.
const CONFIG_FILENAMES: &[&str] = &["imgio.yml", "imgio.yaml"];

/// Loaded configuration, where it came from, and anything worth reporting.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    pub config: ImageIoConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl ConfigHandle {
    fn with_config(config: ImageIoConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }
}

/// Parse a YAML document into a sanitized config.
pub fn parse_config(contents: &str) -> Result<(ImageIoConfig, Vec<String>), serde_yaml::Error> {
    // an empty document deserializes as unit, not as a map
    if contents.trim().is_empty() {
        return Ok((ImageIoConfig::default(), Vec::new()));
    }
    let mut config: ImageIoConfig = serde_yaml::from_str(contents)?;
    let notes = config.sanitize();
    Ok((config, notes))
}

/// Load configuration from disk, optionally forcing a specific path first.
pub fn load_config(custom_path: Option<&Path>) -> ConfigHandle {
    load_from_candidates(config_candidates(custom_path))
}

fn load_from_candidates(candidates: Vec<PathBuf>) -> ConfigHandle {
    let mut warnings = Vec::new();

    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match parse_config(&contents) {
                Ok((config, notes)) => {
                    warnings.extend(notes);
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    log::debug!("loaded imgio config from {}", source.display());
                    for warning in &warnings {
                        log::warn!("config: {}", warning);
                    }
                    return ConfigHandle::with_config(config, Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    for warning in &warnings {
        log::warn!("config: {}", warning);
    }
    warnings.push("No imgio config found; using built-in defaults.".to_string());
    ConfigHandle::with_config(ImageIoConfig::default(), None, warnings)
}

/// Config file candidates, most specific first.
fn config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join(".imgio").join(name));
        }
    }

    candidates
}
