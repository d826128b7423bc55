//! Brickfall - collision and power-up core for a brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, bounce response, power-ups, tick)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Default play-field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PLAYER_VELOCITY: f32 = 500.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);

    /// Paddle bounce steering strength
    pub const BOUNCE_STRENGTH: f32 = 2.0;

    /// Power-up box and fall speed (straight down)
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);

    /// Speed power-up velocity multiplier
    pub const SPEED_FACTOR: f32 = 1.2;
    /// Pad-size power-up width increase (permanent)
    pub const PAD_SIZE_INCREASE: f32 = 50.0;

    /// Screen shake on solid brick hits (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Spawn chances (1 in N)
    pub const POSITIVE_SPAWN_CHANCE: u32 = 75;
    pub const NEGATIVE_SPAWN_CHANCE: u32 = 15;
}

/// Untinted sprite color
pub const WHITE: Vec3 = Vec3::ONE;

/// Center of an axis-aligned box given its top-left position and size
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size / 2.0
}
