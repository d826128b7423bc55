//! Data-driven game balance
//!
//! Loaded from JSON; any field missing from the file keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::PowerUpKind;

/// Tuning load errors
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Per-kind effect durations (seconds). Zero means instant/permanent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpDurations {
    pub speed: f32,
    pub sticky: f32,
    pub pass_through: f32,
    pub pad_size_increase: f32,
    pub confuse: f32,
    pub chaos: f32,
}

impl Default for PowerUpDurations {
    fn default() -> Self {
        Self {
            speed: 0.0,
            sticky: 20.0,
            pass_through: 10.0,
            pad_size_increase: 0.0,
            confuse: 15.0,
            chaos: 15.0,
        }
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    pub ball_radius: f32,
    pub initial_ball_velocity: Vec2,
    /// Horizontal steering strength on paddle bounce
    pub bounce_strength: f32,

    // === Paddle ===
    pub paddle_size: Vec2,
    /// Paddle movement speed (units/sec)
    pub paddle_speed: f32,

    // === Power-ups ===
    pub powerup_size: Vec2,
    pub powerup_velocity: Vec2,
    pub speed_factor: f32,
    pub pad_size_increase: f32,
    /// 1-in-N chance for speed, sticky, pass-through, pad-size-increase
    pub positive_spawn_chance: u32,
    /// 1-in-N chance for confuse and chaos
    pub negative_spawn_chance: u32,
    pub durations: PowerUpDurations,

    // === Effects ===
    pub shake_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            initial_ball_velocity: INITIAL_BALL_VELOCITY,
            bounce_strength: BOUNCE_STRENGTH,

            paddle_size: PLAYER_SIZE,
            paddle_speed: PLAYER_VELOCITY,

            powerup_size: POWERUP_SIZE,
            powerup_velocity: POWERUP_VELOCITY,
            speed_factor: SPEED_FACTOR,
            pad_size_increase: PAD_SIZE_INCREASE,
            positive_spawn_chance: POSITIVE_SPAWN_CHANCE,
            negative_spawn_chance: NEGATIVE_SPAWN_CHANCE,
            durations: PowerUpDurations::default(),

            shake_duration: SHAKE_DURATION,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&contents)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Effect duration for a power-up kind
    pub fn duration_for(&self, kind: PowerUpKind) -> f32 {
        let d = &self.durations;
        match kind {
            PowerUpKind::Speed => d.speed,
            PowerUpKind::Sticky => d.sticky,
            PowerUpKind::PassThrough => d.pass_through,
            PowerUpKind::PadSizeIncrease => d.pad_size_increase,
            PowerUpKind::Confuse => d.confuse,
            PowerUpKind::Chaos => d.chaos,
        }
    }

    /// 1-in-N spawn chance for a power-up kind
    pub fn spawn_chance_for(&self, kind: PowerUpKind) -> u32 {
        if kind.is_negative() {
            self.negative_spawn_chance
        } else {
            self.positive_spawn_chance
        }
    }
}
