use crate::models::CarouselError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;

static CONTAINER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("Invalid container id regex"));

static HEX_COLOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{6})$").expect("Invalid color regex"));

/// Constructor-time carousel settings.
///
/// Immutable once a [`crate::state::Carousel`] has been built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Identifies the mount point on the host surface
    pub container_id: String,

    /// Duration of every transition, in milliseconds
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,

    #[serde(default)]
    pub auto_play: bool,

    /// Milliseconds between automatic advances
    #[serde(default)]
    pub auto_play_duration_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            container_id: "carousel".to_string(),
            animation_duration_ms: default_animation_duration_ms(),
            auto_play: false,
            auto_play_duration_ms: 0,
        }
    }
}

fn default_animation_duration_ms() -> u64 {
    300
}

impl CarouselConfig {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn auto_play_duration(&self) -> Duration {
        Duration::from_millis(self.auto_play_duration_ms)
    }

    /// Check the settings that do not depend on the rendering surface.
    ///
    /// # Errors
    ///
    /// Returns a [`CarouselError`] for a malformed container id, a zero animation
    /// duration, or auto-play enabled with a zero period.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if !CONTAINER_ID_PATTERN.is_match(&self.container_id) {
            return Err(CarouselError::InvalidContainerId(self.container_id.clone()));
        }
        if self.animation_duration_ms == 0 {
            return Err(CarouselError::ZeroAnimationDuration);
        }
        if self.auto_play && self.auto_play_duration_ms == 0 {
            return Err(CarouselError::ZeroAutoPlayDuration);
        }
        Ok(())
    }
}

/// Demo window geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_window_width")]
    pub width: u32,

    #[serde(default = "default_window_height")]
    pub height: u32,

    #[serde(default = "default_true")]
    pub show_navigation: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            show_navigation: true,
        }
    }
}

fn default_window_width() -> u32 {
    800
}

fn default_window_height() -> u32 {
    450
}

fn default_true() -> bool {
    true
}

/// One slide shown by the demo host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSpec {
    pub title: String,

    #[serde(default)]
    pub caption: String,

    /// Background as `#rrggbb`
    pub color: String,
}

impl SlideSpec {
    pub fn new(title: &str, caption: &str, color: &str) -> Self {
        Self {
            title: title.to_string(),
            caption: caption.to_string(),
            color: color.to_string(),
        }
    }

    /// Parse the background color into RGB components.
    ///
    /// Returns `None` when the color is not of the form `#rrggbb`.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let captures = HEX_COLOR_PATTERN.captures(&self.color)?;
        let hex = captures.get(1)?.as_str();
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

/// Logging destination and verbosity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_directory")]
    pub directory: String,

    #[serde(default = "default_log_prefix")]
    pub prefix: String,

    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_true")]
    pub console: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            prefix: default_log_prefix(),
            debug: false,
            console: true,
        }
    }
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_prefix() -> String {
    "loop-carousel".to_string()
}

/// Complete contents of `carousel.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub carousel: CarouselConfig,

    #[serde(default)]
    pub window: WindowSettings,

    #[serde(default)]
    pub slides: Vec<SlideSpec>,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselConfig {
                auto_play: true,
                auto_play_duration_ms: 4000,
                ..CarouselConfig::default()
            },
            window: WindowSettings::default(),
            slides: vec![
                SlideSpec::new("Harbor", "Morning fog over the water", "#2d6a8f"),
                SlideSpec::new("Dunes", "Wind-carved ridges at dusk", "#c98b3a"),
                SlideSpec::new("Canopy", "Light through old-growth leaves", "#3f7d4e"),
                SlideSpec::new("Glacier", "Blue ice in late summer", "#6fa8c9"),
            ],
            logging: LoggingSettings::default(),
        }
    }
}

impl AppConfig {
    /// Validate the carousel section and every slide color.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.carousel.validate()?;
        if self.slides.is_empty() {
            return Err(CarouselError::EmptyCarousel.into());
        }
        for slide in &self.slides {
            if slide.rgb().is_none() {
                anyhow::bail!("Slide {:?} has invalid color {:?}", slide.title, slide.color);
            }
        }
        if self.window.width == 0 {
            return Err(CarouselError::InvalidViewportWidth(0.0).into());
        }
        Ok(())
    }
}
