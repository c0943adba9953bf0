//! Configuration file discovery and loading.

use crate::config::schema::GuardConfig;
use crate::error::{PrGuardError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".prguard.yml";

/// Resolve the config path: the explicit override, or the default file
/// under `project_root`.
pub fn config_path(project_root: &Path, config_override: Option<&Path>) -> PathBuf {
    match config_override {
        Some(path) => path.to_path_buf(),
        None => project_root.join(DEFAULT_CONFIG_FILE),
    }
}

/// Load a single config file and parse it into GuardConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML (or JSON) is invalid.
pub fn load_config_file(path: &Path) -> Result<GuardConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PrGuardError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PrGuardError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into GuardConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<GuardConfig> {
    if content.trim().is_empty() {
        return Ok(GuardConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| PrGuardError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<GuardConfig> {
    let path = config_path(project_root, config_override);
    tracing::debug!("Loading config from {}", path.display());
    load_config_file(&path)
}
