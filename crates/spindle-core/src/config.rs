use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::layout::LayoutPrefs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Easing curve applied to track transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// No interpolation, jump at the end
    None,
    Linear,
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Preferred number of simultaneously visible items (odd, for exact centering)
    #[serde(default = "default_visible_count")]
    pub preferred_visible_count: u32,
    /// Minimum item width in cells; narrower layouts drop the visible count
    #[serde(default = "default_min_item_width")]
    pub min_item_width: u32,
    /// Maximum item width in cells
    #[serde(default = "default_max_item_width")]
    pub max_item_width: u32,
    /// Divisor applied to the container width to derive the inter-item gap
    #[serde(default = "default_gap_divisor")]
    pub gap_divisor: u32,
    /// Lower clamp for the derived gap
    #[serde(default = "default_min_gap")]
    pub min_gap: u32,
    /// Upper clamp for the derived gap
    #[serde(default = "default_max_gap")]
    pub max_gap: u32,
    /// Item height as a fraction of item width (terminal cells are tall,
    /// so ~0.3 renders roughly square images with halfblocks)
    #[serde(default = "default_aspect")]
    pub aspect: f64,
    /// Rows reserved for chrome (title, status bar) when capping item height
    #[serde(default = "default_reserved_rows")]
    pub reserved_rows: u32,
    /// Milliseconds between automatic advances
    #[serde(default = "default_autoplay_interval")]
    pub autoplay_interval_ms: u64,
    /// Start with autoplay running
    #[serde(default = "default_true")]
    pub autoplay_on_start: bool,
    /// Duration of an animated transition in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve for animated transitions
    #[serde(default = "default_easing")]
    pub easing: EasingType,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            preferred_visible_count: default_visible_count(),
            min_item_width: default_min_item_width(),
            max_item_width: default_max_item_width(),
            gap_divisor: default_gap_divisor(),
            min_gap: default_min_gap(),
            max_gap: default_max_gap(),
            aspect: default_aspect(),
            reserved_rows: default_reserved_rows(),
            autoplay_interval_ms: default_autoplay_interval(),
            autoplay_on_start: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: default_easing(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval in milliseconds (also the animation frame cadence)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Quiet window before a resize storm triggers layout recomputation
    #[serde(default = "default_resize_debounce")]
    pub resize_debounce_ms: u64,
    /// Log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            resize_debounce_ms: default_resize_debounce(),
            log_level: default_log_level(),
        }
    }
}

fn default_visible_count() -> u32 {
    5
}

fn default_min_item_width() -> u32 {
    10
}

fn default_max_item_width() -> u32 {
    48
}

fn default_gap_divisor() -> u32 {
    50
}

fn default_min_gap() -> u32 {
    1
}

fn default_max_gap() -> u32 {
    4
}

fn default_aspect() -> f64 {
    0.3
}

fn default_reserved_rows() -> u32 {
    4
}

fn default_autoplay_interval() -> u64 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_animation_duration() -> u64 {
    600
}

fn default_easing() -> EasingType {
    EasingType::Cubic
}

fn default_tick_rate() -> u64 {
    33
}

fn default_resize_debounce() -> u64 {
    200
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from file or return defaults.
    ///
    /// A missing file is not an error; a default config is written so the
    /// user has something to edit.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            if let Err(e) = config.save_to(config_path) {
                tracing::warn!("Could not write default config to {:?}: {}", config_path, e);
            }
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save_to(&self, config_path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Configuration file path: ~/.config/spindle/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("spindle")
            .join("config.toml")
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> crate::Result<()> {
        let c = &self.carousel;
        if c.preferred_visible_count == 0 {
            return Err(crate::Error::Config(
                "carousel.preferred_visible_count must be at least 1".into(),
            ));
        }
        if c.preferred_visible_count % 2 == 0 {
            return Err(crate::Error::Config(format!(
                "carousel.preferred_visible_count must be odd for exact centering, got {}",
                c.preferred_visible_count
            )));
        }
        if c.min_item_width == 0 || c.min_item_width > c.max_item_width {
            return Err(crate::Error::Config(format!(
                "carousel item width bounds are invalid: min {} max {}",
                c.min_item_width, c.max_item_width
            )));
        }
        if c.min_gap > c.max_gap {
            return Err(crate::Error::Config(format!(
                "carousel gap bounds are invalid: min {} max {}",
                c.min_gap, c.max_gap
            )));
        }
        if c.gap_divisor == 0 {
            return Err(crate::Error::Config("carousel.gap_divisor must be nonzero".into()));
        }
        if !(c.aspect > 0.0) {
            return Err(crate::Error::Config("carousel.aspect must be positive".into()));
        }
        if c.autoplay_interval_ms == 0 {
            return Err(crate::Error::Config(
                "carousel.autoplay_interval_ms must be nonzero".into(),
            ));
        }
        Ok(())
    }

}

impl CarouselConfig {
    /// Layout preferences derived from this config
    pub fn layout_prefs(&self) -> LayoutPrefs {
        LayoutPrefs {
            preferred_visible_count: self.preferred_visible_count,
            min_item_width: self.min_item_width,
            max_item_width: self.max_item_width,
            gap_divisor: self.gap_divisor,
            gap_bounds: (self.min_gap, self.max_gap),
            aspect: self.aspect,
            reserved_rows: self.reserved_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.carousel.preferred_visible_count, 5);
        assert_eq!(config.carousel.autoplay_interval_ms, 3000);
        assert_eq!(config.carousel.easing, EasingType::Cubic);
    }

    #[test]
    fn test_even_visible_count_rejected() {
        let mut config = AppConfig::default();
        config.carousel.preferred_visible_count = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [carousel]
            autoplay_interval_ms = 5000
            "#,
        )
        .unwrap();
        assert_eq!(config.carousel.autoplay_interval_ms, 5000);
        assert_eq!(config.carousel.preferred_visible_count, 5);
        assert_eq!(config.ui.tick_rate_ms, 33);
    }

    #[test]
    fn test_easing_roundtrip() {
        let config: AppConfig = toml::from_str(
            r#"
            [carousel]
            easing = "ease_out"
            "#,
        )
        .unwrap();
        assert_eq!(config.carousel.easing, EasingType::EaseOut);
    }
}
