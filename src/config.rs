use std::path::Path;
use std::time::Duration;

use iced::Color;
use serde::Deserialize;

use crate::error::Error;

pub const PARAMETERS_FILE: &str = "digital-grid.json";
pub const CANVAS_ID: &str = "digital-grid";

/// Tunables of the background animation, read from `digital-grid.json`.
///
/// Every field is optional in the file; missing ones keep their default.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Parameters {
    pub particle_count: usize,
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub grid_size: f32,
    pub grid_step: f32,
    pub link_distance: f32,
    pub ripple_growth: f32,
    pub ripple_max_radius: f32,
    pub frame_interval_ms: u64,
    /// Name of the canvas the animation binds to; `null` leaves the page
    /// without a background.
    pub canvas: Option<String>,
    pub seed: Option<u64>,
    pub show_stats: bool,
    pub palette: Palette,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub background: [u8; 3],
    pub grid: [u8; 3],
    pub grid_alpha: f32,
    pub grid_width: f32,
    pub particle: [u8; 3],
    pub link: [u8; 3],
    pub link_alpha: f32,
    pub ripple: [u8; 3],
    pub ripple_width: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            particle_count: 100,
            max_speed: 0.25,
            min_radius: 1.0,
            max_radius: 3.0,
            grid_size: 50.0,
            grid_step: 0.2,
            link_distance: 150.0,
            ripple_growth: 2.0,
            ripple_max_radius: 100.0,
            frame_interval_ms: 16,
            canvas: Some(CANVAS_ID.to_string()),
            seed: None,
            show_stats: false,
            palette: Palette::default(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: [0x0a, 0x0e, 0x27],
            grid: [0x00, 0xd4, 0xff],
            grid_alpha: 0.3,
            grid_width: 1.0,
            particle: [0x00, 0xff, 0xb3],
            link: [0x00, 0xd4, 0xff],
            link_alpha: 0.4,
            ripple: [0x00, 0xd4, 0xff],
            ripple_width: 2.0,
        }
    }
}

impl Palette {
    pub fn color(rgb: [u8; 3], alpha: f32) -> Color {
        Color::from_rgba8(rgb[0], rgb[1], rgb[2], alpha)
    }

    pub fn background_color(&self) -> Color {
        Self::color(self.background, 1.0)
    }
}

impl Parameters {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let parameters: Parameters = serde_json::from_str(json)?;
        parameters.validate()?;
        Ok(parameters)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), Error> {
        fn positive(name: &'static str, v: f32) -> Result<(), Error> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(Error::InvalidParameter {
                    name,
                    reason: "must be a positive number",
                })
            }
        }

        positive("grid_size", self.grid_size)?;
        positive("grid_step", self.grid_step)?;
        positive("link_distance", self.link_distance)?;
        positive("ripple_growth", self.ripple_growth)?;
        positive("ripple_max_radius", self.ripple_max_radius)?;
        positive("min_radius", self.min_radius)?;
        positive("max_radius", self.max_radius)?;
        if !(self.max_speed >= 0.0 && self.max_speed.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "max_speed",
                reason: "must be zero or positive",
            });
        }
        if self.min_radius > self.max_radius {
            return Err(Error::InvalidParameter {
                name: "min_radius",
                reason: "must not exceed max_radius",
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(Error::InvalidParameter {
                name: "frame_interval_ms",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
