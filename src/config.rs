use crate::error::ChessResult;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    // Board window
    pub show_board: bool,
    pub figures_dir: PathBuf,
    pub tile: u32,

    // Speech
    pub vosk_model_path: String,
    pub audio_device: Option<usize>,
    pub listen_timeout_secs: u64,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_board: true,
            figures_dir: PathBuf::from("figures"),
            tile: 80,
            vosk_model_path: dirs::data_dir()
                .unwrap_or_default()
                .join("vosk/model")
                .to_string_lossy()
                .to_string(),
            audio_device: None,
            listen_timeout_secs: 6,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from the standard location, or fall back to defaults
    pub fn load() -> ChessResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path.
    ///
    /// A missing file yields the defaults; an unreadable JSON document is
    /// logged and also yields the defaults. The file is never written back.
    pub fn load_from(path: &Path) -> ChessResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(
                    "⚠️ Config file {} is invalid, using defaults: {}",
                    path.display(),
                    e
                );
                Ok(Self::default())
            }
        }
    }

    pub fn listen_timeout(&self) -> Duration {
        Duration::from_secs(self.listen_timeout_secs.max(1))
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voice-chess")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.show_board);
        assert_eq!(config.tile, 80);
        assert_eq!(config.figures_dir, PathBuf::from("figures"));
        assert_eq!(config.listen_timeout_secs, 6);
        assert_eq!(config.audio_device, None);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_from(&dir.path().join("nope.json")).expect("load");
        assert_eq!(config.tile, 80);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "tile": 64, "show_board": false }"#).expect("write");

        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.tile, 64);
        assert!(!config.show_board);
        assert_eq!(config.listen_timeout_secs, 6);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").expect("write");

        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.tile, 80);
        // Left untouched on disk
        assert!(path.exists());
    }

    #[test]
    fn test_listen_timeout_never_zero() {
        let config = Config {
            listen_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.listen_timeout(), Duration::from_secs(1));
    }
}
