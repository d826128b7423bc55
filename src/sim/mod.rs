//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep
//! - Seeded RNG only
//! - Stable iteration order (level load order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod powerup;
pub mod resolve;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionResult, Direction, box_overlap, circle_box_collision, classify_direction,
};
pub use powerup::{EffectTargets, SpawnRoll, spawn_power_ups, update_power_ups};
pub use resolve::{advance_ball, paddle_bounce, resolve_brick_contact};
pub use state::{
    Ball, Body, GamePhase, GameState, Level, NoTextures, PowerUp, PowerUpKind, PowerUpTextures,
    ScreenEffects, TextureHandle, TextureSource,
};
pub use tick::{TickInput, do_collisions, process_input, tick, update};
