//! Editor configuration loading

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::placement::CommitPolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub editor: PlacementConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub markers: MarkerConfig,
    #[serde(default)]
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Key code that commits the box being placed
    #[serde(default = "default_commit_key")]
    pub commit_key: String,
    /// Behavior when committing before any drag
    #[serde(default)]
    pub commit_policy: CommitPolicy,
    /// Where a new box appears
    #[serde(default)]
    pub default_position: [f32; 3],
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            commit_key: default_commit_key(),
            commit_policy: CommitPolicy::default(),
            default_position: [0.0; 3],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// glTF file, relative to the asset root
    #[serde(default = "default_model_path")]
    pub path: String,
    #[serde(default = "default_model_position")]
    pub position: [f32; 3],
    #[serde(default = "default_one")]
    pub scale: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            position: default_model_position(),
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Edge length before scaling
    #[serde(default = "default_marker_size")]
    pub size: f32,
    #[serde(default = "default_marker_scale")]
    pub scale: f32,
    /// sRGB color
    #[serde(default = "default_marker_color")]
    pub color: [f32; 3],
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            size: default_marker_size(),
            scale: default_marker_scale(),
            color: default_marker_color(),
        }
    }
}

impl MarkerConfig {
    /// Edge length in world units
    pub fn extent(&self) -> f32 {
        self.size * self.scale
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            sensitivity: default_sensitivity(),
            zoom_speed: default_zoom_speed(),
        }
    }
}

fn default_commit_key() -> String {
    "KeyS".to_string()
}

fn default_model_path() -> String {
    "assets/low_poly_building/scene.gltf".to_string()
}

fn default_model_position() -> [f32; 3] {
    [2.0, 0.0, -2.0]
}

fn default_one() -> f32 {
    1.0
}

fn default_marker_size() -> f32 {
    4.0
}

fn default_marker_scale() -> f32 {
    0.1
}

fn default_marker_color() -> [f32; 3] {
    [1.0, 0.41, 0.71] // hot pink
}

fn default_camera_position() -> [f32; 3] {
    [12.0, 12.0, 12.0]
}

fn default_sensitivity() -> f32 {
    0.005
}

fn default_zoom_speed() -> f32 {
    0.1
}

impl EditorConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Load configuration from `path`, falling back to defaults when it does not exist
pub fn load_config(path: &Path) -> Result<EditorConfig, ConfigError> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config = EditorConfig::from_toml(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("boxmark.toml")).unwrap();

        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.editor.commit_key, "KeyS");
        assert_eq!(config.model.position, [2.0, 0.0, -2.0]);
        assert!((config.markers.extent() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[editor]
commit_key = "Enter"
commit_policy = "require_drag"

[model]
path = "assets/tower.glb"
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.editor.commit_key, "Enter");
        assert_eq!(config.editor.commit_policy, CommitPolicy::RequireDrag);
        assert_eq!(config.model.path, "assets/tower.glb");
        assert_eq!(config.model.scale, 1.0);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let config = EditorConfig::from_toml(include_str!("../../../boxmark.example.toml")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[editor\ncommit_key = ").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
