use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Point;
use crate::input::ModifierKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed preview config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

const APP_DIR: &str = "quick-preview";
const APP_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    #[default]
    Auto,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Custom,
    FollowPointer,
}

/// Flat settings object for the preview feature, as persisted by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub modifier: ModifierKey,
    /// Keep the old preview on screen until its replacement is ready.
    pub lazy_hide: bool,
    pub position: PositionMode,
    pub custom_position: Point,
    /// Log every normalized suggestion item.
    pub debug_log: bool,
    /// Ask the host not to close the list (useful when inspecting it).
    pub keep_list_open: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            modifier: ModifierKey::Alt,
            lazy_hide: true,
            position: PositionMode::Auto,
            custom_position: Point::default(),
            debug_log: false,
            keep_list_open: false,
        }
    }
}

pub fn parse_preview_config(contents: &str) -> ConfigResult<PreviewConfig> {
    Ok(serde_json::from_str(contents)?)
}

pub fn read_preview_config(path: &Path) -> ConfigResult<PreviewConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_preview_config(&contents)
}

pub fn load_preview_config() -> PreviewConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_preview_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_preview_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> PreviewConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return PreviewConfig::default(),
    };
    if !path.exists() {
        return PreviewConfig::default();
    }
    read_preview_config(&path).unwrap_or_else(|err| {
        tracing::warn!(%err, ?path, "failed to load preview config; using defaults");
        PreviewConfig::default()
    })
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
