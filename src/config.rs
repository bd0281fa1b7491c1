//! Startup configuration.
//!
//! Read once from JSON. The path comes from `CANVAS_EDITOR_CONFIG`, falling
//! back to `canvas-editor.json` in the working directory. A missing default
//! file is not an error; every field has a default.

use crate::constants::*;
use crate::error::{EditorError, Result};
use crate::grid::GridLayout;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "CANVAS_EDITOR_CONFIG";
/// Config file looked up when the variable is unset
pub const DEFAULT_CONFIG_FILE: &str = "canvas-editor.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub grid: GridLayout,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Fixed seed for tile colors; random when absent
    pub seed: Option<u64>,
    /// Fetch images, audio and video for media tiles
    pub load_media: bool,
    /// Start the puffin HTTP server
    pub profiler: bool,
    /// Filter used when no log environment variable is set
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_DEFAULT_WIDTH,
            window_height: WINDOW_DEFAULT_HEIGHT,
            grid: GridLayout::default(),
            min_scale: CAMERA_MIN_SCALE,
            max_scale: CAMERA_MAX_SCALE,
            seed: None,
            load_media: true,
            profiler: false,
            log_level: "info".to_string(),
        }
    }
}

impl EditorConfig {
    /// Load from the environment-selected path or the default file
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EditorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path.to_path_buf())
    }

    fn from_json(text: &str, path: PathBuf) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|source| EditorError::ConfigParse { path, source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(EditorError::ConfigInvalid("window size must be non-zero".into()));
        }
        if self.grid.cols == 0 || self.grid.rows == 0 {
            return Err(EditorError::ConfigInvalid("grid needs at least one row and column".into()));
        }
        if self.grid.cols > GRID_MAX_SIDE || self.grid.rows > GRID_MAX_SIDE {
            return Err(EditorError::ConfigInvalid(format!(
                "grid is limited to {GRID_MAX_SIDE} columns and rows (got {}x{})",
                self.grid.cols, self.grid.rows
            )));
        }
        if self.grid.tile_size <= 0.0 || self.grid.gap < 0.0 {
            return Err(EditorError::ConfigInvalid(
                "tile size must be positive and gap non-negative".into(),
            ));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(EditorError::ConfigInvalid(format!(
                "scale limits must satisfy 0 < min <= max (got {} and {})",
                self.min_scale, self.max_scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<EditorConfig> {
        EditorConfig::from_json(text, PathBuf::from("test.json"))
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = parse("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.grid.cols, GRID_COLS);
        assert!(config.load_media);
    }

    #[test]
    fn test_partial_override() {
        let config = parse(r#"{ "seed": 7, "grid": { "cols": 3 }, "profiler": true }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.grid.cols, 3);
        assert_eq!(config.grid.rows, GRID_ROWS);
        assert!(config.profiler);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse(r#"{ "zoom": 2 }"#).unwrap_err();
        assert!(matches!(err, EditorError::ConfigParse { .. }));
    }

    #[test]
    fn test_invalid_scale_limits_rejected() {
        let err = parse(r#"{ "min_scale": 4.0, "max_scale": 2.0 }"#).unwrap_err();
        assert!(matches!(err, EditorError::ConfigInvalid(_)));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let err = parse(r#"{ "grid": { "rows": 0 } }"#).unwrap_err();
        assert!(matches!(err, EditorError::ConfigInvalid(_)));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let err = parse(r#"{ "grid": { "cols": 70000, "rows": 70000 } }"#).unwrap_err();
        assert!(matches!(err, EditorError::ConfigInvalid(_)));
        assert!(parse(r#"{ "grid": { "cols": 256, "rows": 256 } }"#).is_ok());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = EditorConfig::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, EditorError::ConfigRead { .. }));
    }
}
