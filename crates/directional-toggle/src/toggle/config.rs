//! Toggle configuration: presentation style, animation profile and TOML loading.
//!
//! ```
//! use directional_toggle::{Orientation, ToggleConfig};
//!
//! let config = ToggleConfig::from_toml_str(r##"
//!     orientation = "vertical"
//!     options = [
//!         { label = "Left", value = "left" },
//!         { label = "Right", value = "right" },
//!     ]
//!
//!     [style]
//!     thumb = "#ffffff"
//!
//!     [animation]
//!     duration = 250
//! "##).unwrap();
//!
//! assert_eq!(config.orientation, Orientation::Vertical);
//! assert_eq!(config.options.len(), 2);
//! assert_eq!(config.animation.damping, None);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directional_toggle_core::logging::targets;
use serde::Deserialize;

use crate::animation::{SpringConfig, TimingConfig};
use crate::types::{Color, Orientation};

use super::option::{OptionValue, ToggleOption};

/// Duration used when a configured profile leaves it out, in milliseconds.
pub const FALLBACK_DURATION_MS: f32 = 150.0;
/// Spring damping used when a configured profile leaves it out.
pub const FALLBACK_DAMPING: f32 = 20.0;
/// Spring stiffness used when a configured profile leaves it out.
pub const FALLBACK_STIFFNESS: f32 = 200.0;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML text is malformed or does not match the expected shape.
    #[error("Failed to parse toggle config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("Failed to read toggle config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A style metric is negative or not finite.
    #[error("Invalid style value for '{field}': {value}")]
    InvalidStyle { field: &'static str, value: f32 },

    /// An animation parameter is out of range.
    #[error("Invalid animation parameter '{field}': {value}")]
    InvalidAnimation { field: &'static str, value: f32 },
}

/// Visual appearance of the toggle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToggleStyle {
    /// Cross-axis size when horizontal; size of one option when vertical.
    pub height: f32,
    /// Fixed width of a vertical toggle.
    pub vertical_width: f32,
    /// Gap between the container edge and the thumb.
    pub thumb_inset: f32,
    pub container_radius: f32,
    pub thumb_radius: f32,
    pub font_size: f32,
    /// Label color of the selected option.
    pub active_text: Color,
    /// Label color of the other options.
    pub inactive_text: Color,
    /// Fill of the sliding thumb.
    pub thumb: Color,
    /// Fill of the container.
    pub background: Color,
}

impl Default for ToggleStyle {
    fn default() -> Self {
        Self {
            height: 36.0,
            vertical_width: 128.0,
            thumb_inset: 4.0,
            container_radius: 16.0,
            thumb_radius: 12.0,
            font_size: 13.0,
            active_text: Color::from_rgb8(0x37, 0x37, 0x37),
            inactive_text: Color::from_rgba8(0xde, 0xde, 0xde, 0xff),
            thumb: Color::from_rgb8(0xd4, 0xd4, 0xd4),
            background: Color::from_rgb8(0x9a, 0x9a, 0x9a),
        }
    }
}

impl ToggleStyle {
    /// Check that every metric is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let metrics = [
            ("height", self.height),
            ("vertical_width", self.vertical_width),
            ("thumb_inset", self.thumb_inset),
            ("container_radius", self.container_radius),
            ("thumb_radius", self.thumb_radius),
            ("font_size", self.font_size),
        ];
        for (field, value) in metrics {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidStyle { field, value });
            }
        }
        Ok(())
    }
}

/// Animation profile of the toggle.
///
/// `duration` (milliseconds) drives taps and external value changes; `damping`
/// and `stiffness` drive the spring that settles a released drag. A field left
/// as `None` falls back to 150 ms, 20 and 200 respectively.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AnimationConfig {
    pub duration: Option<f32>,
    pub damping: Option<f32>,
    pub stiffness: Option<f32>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Some(100.0),
            damping: Some(50.0),
            stiffness: Some(200.0),
        }
    }
}

impl AnimationConfig {
    /// A profile with every field unset.
    pub const UNSET: Self = Self {
        duration: None,
        damping: None,
        stiffness: None,
    };

    /// Time-based profile for taps and external changes.
    ///
    /// A missing, negative or non-finite duration falls back to
    /// [`FALLBACK_DURATION_MS`].
    pub fn timing(&self) -> TimingConfig {
        let millis = usable("duration", self.duration, FALLBACK_DURATION_MS, |v| v >= 0.0);
        TimingConfig::new(Duration::from_micros((millis * 1000.0).round() as u64))
    }

    /// Spring profile for drag release.
    ///
    /// A missing, non-positive or non-finite field falls back to
    /// [`FALLBACK_STIFFNESS`] or [`FALLBACK_DAMPING`].
    pub fn spring(&self) -> SpringConfig {
        SpringConfig::new(
            usable("stiffness", self.stiffness, FALLBACK_STIFFNESS, |v| v > 0.0),
            usable("damping", self.damping, FALLBACK_DAMPING, |v| v > 0.0),
            1.0,
        )
    }

    /// Check that every present parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(value) = self.duration
            && (!value.is_finite() || value < 0.0)
        {
            return Err(ConfigError::InvalidAnimation {
                field: "duration",
                value,
            });
        }
        for (field, value) in [("damping", self.damping), ("stiffness", self.stiffness)] {
            if let Some(value) = value
                && (!value.is_finite() || value <= 0.0)
            {
                return Err(ConfigError::InvalidAnimation { field, value });
            }
        }
        Ok(())
    }
}

fn usable(
    field: &'static str,
    value: Option<f32>,
    fallback: f32,
    in_range: fn(f32) -> bool,
) -> f32 {
    match value {
        Some(value) if value.is_finite() && in_range(value) => value,
        Some(value) => {
            tracing::warn!(
                target: targets::CONFIG,
                field,
                value,
                fallback,
                "unusable animation parameter replaced"
            );
            fallback
        }
        None => fallback,
    }
}

/// Complete description of a toggle, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    pub orientation: Orientation,
    pub options: Vec<ToggleOption>,
    /// Initially selected value.
    pub value: Option<OptionValue>,
    pub style: ToggleStyle,
    pub animation: AnimationConfig,
}

impl ToggleConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ToggleConfig = toml::from_str(text)?;
        config.validate()?;
        tracing::debug!(
            target: targets::CONFIG,
            orientation = ?config.orientation,
            options = config.options.len(),
            "toggle config loaded"
        );
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.style.validate()?;
        self.animation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ToggleConfig::from_toml_str("").unwrap();
        assert_eq!(config, ToggleConfig::default());
        assert_eq!(config.animation.timing().duration, Duration::from_millis(100));
        assert_eq!(config.animation.spring(), SpringConfig::new(200.0, 50.0, 1.0));
    }

    #[test]
    fn test_partial_animation_table_falls_back_per_field() {
        let config = ToggleConfig::from_toml_str("[animation]\nstiffness = 300\n").unwrap();
        assert_eq!(config.animation.duration, None);
        assert_eq!(config.animation.timing().duration, Duration::from_millis(150));
        assert_eq!(config.animation.spring(), SpringConfig::new(300.0, 20.0, 1.0));
    }

    #[test]
    fn test_style_colors() {
        let config = ToggleConfig::from_toml_str(
            r##"
            [style]
            active_text = "#000000"
            height = 40
            "##,
        )
        .unwrap();
        assert_eq!(config.style.active_text, Color::BLACK);
        assert_eq!(config.style.height, 40.0);
        assert_eq!(config.style.thumb, ToggleStyle::default().thumb);
    }

    #[test]
    fn test_malformed_color_is_a_parse_error() {
        let err = ToggleConfig::from_toml_str("[style]\nthumb = \"#zzzzzz\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("invalid color"));
    }

    #[test]
    fn test_validation() {
        let err = ToggleConfig::from_toml_str("[animation]\ndamping = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidAnimation {
                field: "damping",
                ..
            }
        ));

        let err = ToggleConfig::from_toml_str("[style]\nthumb_inset = -1\n").unwrap_err();
        assert_eq!(err.to_string(), "Invalid style value for 'thumb_inset': -1");
    }

    #[test]
    fn test_unusable_parameters_fall_back() {
        let animation = AnimationConfig {
            duration: Some(f32::INFINITY),
            damping: Some(-5.0),
            stiffness: Some(0.0),
        };
        assert_eq!(animation.timing().duration, Duration::from_millis(150));
        assert_eq!(animation.spring(), SpringConfig::new(200.0, 20.0, 1.0));

        let animation = AnimationConfig {
            duration: Some(-1.0),
            damping: Some(f32::NAN),
            stiffness: Some(f32::NAN),
        };
        assert_eq!(animation.timing().duration, Duration::from_millis(150));
        assert!(animation.spring().is_valid());
    }

    #[test]
    fn test_missing_file() {
        let err = ToggleConfig::from_toml_file("/nonexistent/toggle.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
