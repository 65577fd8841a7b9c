//! Application configuration
//!
//! Read from `studio.ron` in the working directory, then from the platform
//! config directory. Missing file or missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name
pub const CONFIG_FILE: &str = "studio.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Directory for the snapshot file (native only; platform data dir if unset)
    pub data_dir: Option<PathBuf>,
    /// Multiplier on simulated request latency; 0 makes requests resolve next frame
    pub latency_scale: f32,
    /// Pointer travel (pixels) before a press on an object becomes a drag
    pub drag_threshold_px: f32,
    /// How long a toast stays visible
    pub toast_seconds: f32,
    /// Write the demo dataset when no snapshot exists yet
    pub seed_initial_data: bool,
    /// Keep the snapshot in memory only; it is lost on exit
    pub in_memory: bool,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            latency_scale: 1.0,
            drag_threshold_px: 3.0,
            toast_seconds: 4.0,
            seed_initial_data: true,
            in_memory: false,
        }
    }
}

impl StudioConfig {
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        let mut config: Self = ron::from_str(text)?;
        config.sanitize();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Candidate config locations, most specific first
    #[cfg(not(target_arch = "wasm32"))]
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("studio-3d").join(CONFIG_FILE));
        }
        paths
    }

    /// First readable config file, or defaults.
    ///
    /// A file that exists but fails to parse is reported and skipped.
    pub fn load() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            for path in Self::search_paths() {
                if !path.exists() {
                    continue;
                }
                match Self::from_file(&path) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring config: {}", e),
                }
            }
            log::debug!("No config file found, using defaults");
            Self::default()
        }
    }

    /// Clamp values that would break the editor
    fn sanitize(&mut self) {
        if !self.latency_scale.is_finite() || self.latency_scale < 0.0 {
            self.latency_scale = 0.0;
        }
        if !self.drag_threshold_px.is_finite() || self.drag_threshold_px < 0.0 {
            self.drag_threshold_px = Self::default().drag_threshold_px;
        }
        if !self.toast_seconds.is_finite() || self.toast_seconds <= 0.0 {
            self.toast_seconds = Self::default().toast_seconds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.latency_scale, 1.0);
        assert_eq!(config.drag_threshold_px, 3.0);
        assert!(config.seed_initial_data);
        assert!(!config.in_memory);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = StudioConfig::from_ron("(latency_scale: 0.0, seed_initial_data: false)").unwrap();
        assert_eq!(config.latency_scale, 0.0);
        assert!(!config.seed_initial_data);
        assert_eq!(config.toast_seconds, 4.0);
    }

    #[test]
    fn test_in_memory_flag() {
        let config = StudioConfig::from_ron("(in_memory: true)").unwrap();
        assert!(config.in_memory);
        assert!(config.seed_initial_data);
    }

    #[test]
    fn test_data_dir_override() {
        let config = StudioConfig::from_ron(r#"(data_dir: Some("/tmp/studio"))"#).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/studio")));
    }

    #[test]
    fn test_invalid_values_sanitized() {
        let config = StudioConfig::from_ron("(latency_scale: -2.0, drag_threshold_px: -1.0, toast_seconds: 0.0)").unwrap();
        assert_eq!(config.latency_scale, 0.0);
        assert_eq!(config.drag_threshold_px, 3.0);
        assert_eq!(config.toast_seconds, 4.0);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.ron");
        assert!(matches!(StudioConfig::from_file(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join(CONFIG_FILE);
        std::fs::write(&bad, "(latency_scale: \"fast\")").unwrap();
        assert!(matches!(StudioConfig::from_file(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_from_file_reads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "(drag_threshold_px: 6.0)").unwrap();
        let config = StudioConfig::from_file(&path).unwrap();
        assert_eq!(config.drag_threshold_px, 6.0);
    }
}
