//! Brick Pong - headless simulation core for paddle-and-brick arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, collisions, formation, round state)
//! - `settings`: Validated game configuration and the shipped presets
//! - `error`: Construction-time errors
//!
//! Rendering, input polling, audio, and frame pacing live outside this crate.
//! A frame pump calls [`sim::tick`] once per frame and hands the returned
//! [`sim::Snapshot`] to whatever draws it.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigurationError;
pub use settings::{GameConfig, PaddleLayout};

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    use super::Color;

    /// Fixed simulation timestep (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions shared by both shipped games
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Largest target grid a formation will lay out
    pub const MAX_TARGETS: u32 = 10_000;

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(220, 20, 60);
    pub const GREEN: Color = Color::rgb(0, 230, 118);
    pub const BLUE: Color = Color::rgb(0, 200, 255);
    pub const YELLOW: Color = Color::rgb(255, 215, 0);
    pub const PURPLE: Color = Color::rgb(160, 32, 240);
    /// Invader formation red
    pub const INVADER_RED: Color = Color::rgb(255, 50, 50);
    /// Solo paddle blue
    pub const SOLO_BLUE: Color = Color::rgb(50, 50, 255);
}

/// Display color carried through to the snapshot for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        consts::WHITE
    }
}
