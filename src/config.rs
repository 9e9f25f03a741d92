use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color::parse_hex_color;
use crate::error::{SketchError, SketchResult};
use crate::state::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::surface::DEFAULT_EXPORT_NAME;

/// Startup settings for a sketch session.
///
/// Every field has a default, so a config file only needs the keys it wants
/// to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Logical canvas width
    pub viewport_width: f32,
    /// Logical canvas height
    pub viewport_height: f32,
    /// Device pixels per logical pixel
    pub pixel_ratio: f32,
    /// Initial brush color as `#rrggbb`
    pub default_color: String,
    pub default_brush_size: f32,
    /// Where "Save As Image" writes the PNG
    pub export_path: PathBuf,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            pixel_ratio: 2.0,
            default_color: "#000000".to_owned(),
            default_brush_size: 5.0,
            export_path: PathBuf::from(DEFAULT_EXPORT_NAME),
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> SketchResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> SketchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> SketchResult<()> {
        let positive = |value: f32| value.is_finite() && value > 0.0;

        if !positive(self.viewport_width) || !positive(self.viewport_height) {
            return Err(SketchError::InvalidConfig(format!(
                "viewport must be positive, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if !positive(self.pixel_ratio) {
            return Err(SketchError::InvalidConfig(format!(
                "pixel_ratio must be positive, got {}",
                self.pixel_ratio
            )));
        }
        if !(MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&self.default_brush_size) {
            return Err(SketchError::InvalidConfig(format!(
                "default_brush_size must be within {MIN_BRUSH_SIZE}..={MAX_BRUSH_SIZE}, got {}",
                self.default_brush_size
            )));
        }
        parse_hex_color(&self.default_color)?;
        Ok(())
    }

    pub fn default_color(&self) -> SketchResult<Color32> {
        parse_hex_color(&self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SketchConfig::default();
        config.validate().unwrap();
        assert_eq!(config.export_path, PathBuf::from("sketch.png"));
        assert_eq!(config.default_color().unwrap(), Color32::BLACK);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r##"{ "pixel_ratio": 1.0, "default_color": "#ff0000" }"##;
        let config = SketchConfig::from_json_str(json).unwrap();
        assert_eq!(config.pixel_ratio, 1.0);
        assert_eq!(config.viewport_width, 1280.0);
        assert_eq!(config.default_color().unwrap(), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            SketchConfig::from_json_str(r#"{ "pixel_ratio": 0 }"#),
            Err(SketchError::InvalidConfig(_))
        ));
        assert!(matches!(
            SketchConfig::from_json_str(r#"{ "default_brush_size": 40 }"#),
            Err(SketchError::InvalidConfig(_))
        ));
        assert!(matches!(
            SketchConfig::from_json_str(r#"{ "default_color": "red" }"#),
            Err(SketchError::InvalidColor(_))
        ));
        assert!(matches!(
            SketchConfig::from_json_str("{ not json"),
            Err(SketchError::ConfigParse(_))
        ));
    }
}
