/*
Sandbox settings.

Everything the loop needs to know before the first frame: window size in
virtual units, target frame rate, gravity, colors and the launch scale.
Loaded once in main and never changed afterwards.

Override any subset of fields with a JSON object in SANDBOX_SETTINGS, e.g.
    SANDBOX_SETTINGS='{"fps": 120, "gravity": [0.0, 400.0]}'
*/

use std::sync::OnceLock;

use macroquad::prelude::{Color, Vec2};
use serde::{Deserialize, Serialize};

/// Environment variable holding a JSON settings override
pub const SETTINGS_ENV: &str = "SANDBOX_SETTINGS";

/// Build a color from 0-255 channels (alpha included)
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    )
}

/// Scene defaults
pub mod consts {
    pub const WIDTH: f32 = 1600.0;
    pub const HEIGHT: f32 = 1000.0;
    pub const FPS: u32 = 60;
    /// Positive Y points down in screen coordinates
    pub const GRAVITY: [f32; 2] = [0.0, 180.0];
    pub const BACKGROUND: [u8; 4] = [30, 30, 30, 255];
    pub const BROWN: [u8; 4] = [139, 69, 19, 255];
    /// Impulse per unit of drag distance
    pub const IMPULSE_SCALE: f32 = 15.0;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    /// World width in virtual units
    pub width: f32,
    /// World height in virtual units
    pub height: f32,
    /// Target frame rate, also fixes the physics timestep
    pub fps: u32,
    pub gravity: [f32; 2],
    pub background: [u8; 4],
    /// Named accent color, used for the stacked blocks
    pub accent: [u8; 4],
    pub impulse_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "My Game".to_string(),
            width: consts::WIDTH,
            height: consts::HEIGHT,
            fps: consts::FPS,
            gravity: consts::GRAVITY,
            background: consts::BACKGROUND,
            accent: consts::BROWN,
            impulse_scale: consts::IMPULSE_SCALE,
        }
    }
}

static SHARED: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Settings for this process, loaded on first use.
    ///
    /// Both the window config and the loop read these, the environment is
    /// consulted only once.
    pub fn shared() -> &'static Settings {
        SHARED.get_or_init(Self::load)
    }

    /// Load settings from SANDBOX_SETTINGS, falling back to defaults
    pub fn load() -> Self {
        match std::env::var(SETTINGS_ENV) {
            Ok(json) => Self::from_json(&json),
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Parse a (possibly partial) JSON override. Invalid input yields defaults.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) if settings.fps > 0 => {
                log::info!("Loaded settings from {}", SETTINGS_ENV);
                settings
            }
            Ok(_) => {
                log::warn!("{} has fps = 0, using default settings", SETTINGS_ENV);
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring invalid {}: {}", SETTINGS_ENV, e);
                Self::default()
            }
        }
    }

    /// Fixed physics timestep: one step per frame
    pub fn dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::from(self.gravity)
    }

    pub fn background_color(&self) -> Color {
        let [r, g, b, a] = self.background;
        rgba(r, g, b, a)
    }

    pub fn accent_color(&self) -> Color {
        let [r, g, b, a] = self.accent;
        rgba(r, g, b, a)
    }
}
