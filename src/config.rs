//! Display and timing configuration.

use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Factor applied to layout values on high resolution displays.
const HIGH_RESOLUTION_SCALE: f64 = 1.5;

/// Configuration.
///
/// Every field has a default, so a TOML file only needs to list what it changes:
///
/// ```toml
/// width = 720
/// height = 1280
/// high_resolution = true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display width in pixels.
    pub width: u32,
    /// Display height in pixels.
    pub height: u32,
    /// If true, layout values are scaled by 1.5.
    pub high_resolution: bool,
    /// Height of the touch bands at the bottom of the display, as a fraction of its height.
    pub touch_height_fraction: f64,
    pub transition_duration_ms: u64,
    /// Duration of a full parallax swing from one end to the other.
    pub parallax_duration_ms: u64,
    /// Parallax swing amplitude before scaling.
    pub parallax_motion_range: i32,
    /// Width of the parallax image.
    pub parallax_image_width: u32,
    pub sensor_update_period_ms: u64,
    /// Time between two rendered frames in the demo loop.
    pub frame_period_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 480,
            height: 854,
            high_resolution: false,
            touch_height_fraction: 0.15,
            transition_duration_ms: 700,
            parallax_duration_ms: 10_000,
            parallax_motion_range: 40,
            parallax_image_width: 640,
            sensor_update_period_ms: 8000,
            frame_period_ms: 40,
        }
    }
}

impl Config {
    /// Parses a configuration from TOML.
    pub fn from_toml_str(source: &str) -> Result<Config> {
        Ok(toml::from_str(source)?)
    }

    /// Loads a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let source = fs::read_to_string(path)?;
        Config::from_toml_str(&source)
    }

    /// Scales a layout value for the display resolution.
    pub fn scale(&self, value: i32) -> i32 {
        if self.high_resolution {
            (f64::from(value) * HIGH_RESOLUTION_SCALE) as i32
        } else {
            value
        }
    }

    /// Height of the touch bands, truncated to whole pixels.
    pub fn touch_height(&self) -> f64 {
        (f64::from(self.height) * self.touch_height_fraction).floor()
    }

    /// Half of the display width, the sweep distance of page transitions.
    pub fn half_width(&self) -> i32 {
        (self.width / 2) as i32
    }

    /// Scaled parallax amplitude.
    pub fn motion_range(&self) -> i32 {
        self.scale(self.parallax_motion_range)
    }

    /// Parallax amplitude reference: half of the parallax image width.
    pub fn parallax_half_width(&self) -> i32 {
        (self.parallax_image_width / 2) as i32
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    pub fn sensor_update_period(&self) -> Duration {
        Duration::from_millis(self.sensor_update_period_ms)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_period_ms)
    }
}
