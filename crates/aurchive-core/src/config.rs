//! Canvas configuration.

use crate::input::Platform;
use crate::objects::StrokeStyle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Wheel gesture tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Largest vertical delta a single zoom gesture may use.
    pub max_zoom_step: f64,
    /// Delta units per 100% of zoom.
    pub zoom_divisor: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            max_zoom_step: 10.0,
            zoom_divisor: 100.0,
        }
    }
}

/// Settings for one drawing canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub platform: Platform,
    pub wheel: WheelConfig,
    /// Style new strokes start with.
    pub stroke_style: StrokeStyle,
}

impl CanvasConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: CanvasConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that could produce a degenerate view transform or an
    /// invisible stroke.
    pub fn validate(&self) -> ConfigResult<()> {
        let wheel = &self.wheel;
        if !(wheel.zoom_divisor.is_finite() && wheel.zoom_divisor > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "zoom_divisor must be positive, got {}",
                wheel.zoom_divisor
            )));
        }
        // A full step must never reach a zoom factor of zero.
        if !(wheel.max_zoom_step >= 0.0 && wheel.max_zoom_step < wheel.zoom_divisor) {
            return Err(ConfigError::Invalid(format!(
                "max_zoom_step must be in [0, {}), got {}",
                wheel.zoom_divisor, wheel.max_zoom_step
            )));
        }
        let width = self.stroke_style.stroke_width;
        if !(width.is_finite() && width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "stroke_width must be positive, got {width}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CanvasConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.platform, Platform::Other);
        assert!((config.wheel.max_zoom_step - 10.0).abs() < f64::EPSILON);
        assert!((config.stroke_style.stroke_width - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = CanvasConfig::from_json(r#"{"platform": "Apple", "wheel": {"max_zoom_step": 5.0}}"#).unwrap();
        assert_eq!(config.platform, Platform::Apple);
        assert!((config.wheel.max_zoom_step - 5.0).abs() < f64::EPSILON);
        assert!((config.wheel.zoom_divisor - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.stroke_style, StrokeStyle::default());
    }

    #[test]
    fn test_empty_json() {
        assert_eq!(CanvasConfig::from_json("{}").unwrap(), CanvasConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(CanvasConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_zoom_step_reaching_zero() {
        let result = CanvasConfig::from_json(r#"{"wheel": {"max_zoom_step": 100.0}}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_divisor() {
        let result = CanvasConfig::from_json(r#"{"wheel": {"zoom_divisor": 0.0}}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_stroke_width() {
        let mut config = CanvasConfig::default();
        config.stroke_style.stroke_width = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
