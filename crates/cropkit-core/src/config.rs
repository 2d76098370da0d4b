//! Cropper configuration.
//!
//! Every field has a default matching the stock widget (500×500 surface,
//! 0.1 zoom steps), so hosts can pass a partial object and only override
//! what they need.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::geometry::Size;
use crate::selection::INITIAL_SELECTION_SIZE;

/// Errors for out-of-range configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Surface cap must be positive, got {width}x{height}")]
    InvalidSurfaceCap { width: f64, height: f64 },

    #[error("Zoom step must be positive, got {0}")]
    InvalidZoomStep(f64),

    #[error("Minimum scale must be positive, got {0}")]
    InvalidMinScale(f64),

    #[error("Initial selection size must be positive, got {0}")]
    InvalidSelectionSize(f64),

    #[error("Opacity must be between 0 and 1, got {0}")]
    InvalidOpacity(f32),
}

/// Settings for a cropping session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropperConfig {
    /// Maximum surface size in CSS pixels.
    pub surface_cap: Size,
    /// Scale change per zoom step.
    pub zoom_step: f64,
    /// Lowest scale reachable by zooming out.
    pub min_scale: f64,
    /// Side length of a freshly started selection.
    pub initial_selection: f64,
    /// Resampling filter for the live preview.
    pub preview_filter: FilterType,
    /// Opacity of the black cover outside the selection (0-1).
    pub cover_opacity: f32,
    /// Selection outline and handle dot color.
    pub stroke_color: [u8; 3],
    /// Rule-of-thirds guide color.
    pub guide_color: [u8; 3],
    /// Opacity of the guide lines (0-1).
    pub guide_opacity: f32,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            surface_cap: Size::new(500.0, 500.0),
            zoom_step: 0.1,
            min_scale: 0.1,
            initial_selection: INITIAL_SELECTION_SIZE,
            preview_filter: FilterType::Bilinear,
            cover_opacity: 0.5,
            stroke_color: [0x56, 0x96, 0xf8],
            guide_color: [255, 255, 255],
            guide_opacity: 0.75,
        }
    }
}

impl CropperConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Negated comparisons also reject NaN
        if !(self.surface_cap.width > 0.0 && self.surface_cap.height > 0.0) {
            return Err(ConfigError::InvalidSurfaceCap {
                width: self.surface_cap.width,
                height: self.surface_cap.height,
            });
        }
        if !(self.zoom_step > 0.0) {
            return Err(ConfigError::InvalidZoomStep(self.zoom_step));
        }
        if !(self.min_scale > 0.0) {
            return Err(ConfigError::InvalidMinScale(self.min_scale));
        }
        if !(self.initial_selection > 0.0) {
            return Err(ConfigError::InvalidSelectionSize(self.initial_selection));
        }
        for opacity in [self.cover_opacity, self.guide_opacity] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(ConfigError::InvalidOpacity(opacity));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CropperConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.surface_cap, Size::new(500.0, 500.0));
        assert_eq!(config.zoom_step, 0.1);
        assert_eq!(config.initial_selection, 4.0);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = CropperConfig::new();
        config.surface_cap = Size::new(0.0, 500.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSurfaceCap { .. })
        ));

        let mut config = CropperConfig::new();
        config.zoom_step = -0.1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidZoomStep(-0.1)));

        let mut config = CropperConfig::new();
        config.min_scale = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMinScale(_))
        ));

        let mut config = CropperConfig::new();
        config.cover_opacity = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::InvalidOpacity(1.5)));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConfigError::InvalidZoomStep(0.0).to_string(),
            "Zoom step must be positive, got 0"
        );
    }
}
