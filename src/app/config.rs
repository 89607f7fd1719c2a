use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::ui::theme::ColorScheme;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid theme file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid color for {key}: {value:?} (expected #rrggbb)")]
    InvalidColor { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub struct AppConfig {
    pub log_path: PathBuf,
    pub theme_path: Option<PathBuf>,
    pub poll_interval: Duration,
    pub message_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        let log_path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bitvision")
            .join("bitvision.log");

        Self {
            log_path,
            theme_path: None,
            poll_interval: Duration::from_millis(100),
            message_timeout: Duration::from_secs(5),
        }
    }
}

impl AppConfig {
    /// Build from command line arguments: `bitvision-login [THEME_JSON]`
    pub fn from_args(args: &[String]) -> Self {
        let mut config = Self::default();
        config.theme_path = args.get(1).map(PathBuf::from);
        config
    }

    pub fn color_scheme(&self) -> ConfigResult<ColorScheme> {
        match &self.theme_path {
            Some(path) => load_theme(path),
            None => Ok(ColorScheme::default()),
        }
    }
}

pub fn load_theme(path: &Path) -> ConfigResult<ColorScheme> {
    let json = std::fs::read_to_string(path)?;
    ColorScheme::from_json(&json)
}
