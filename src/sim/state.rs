//! Game state and core simulation types
//!
//! Entities are plain records: a `Body` box plus capability fields.
//! Everything here is mutated in place by the tick orchestrator.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::{WHITE, box_center};

/// Coarse game phase. Physics only runs while `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Menu,
    Win,
}

/// Opaque texture handle, owned and interpreted by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Texture lookup by string key
pub trait TextureSource {
    fn texture(&self, key: &str) -> TextureHandle;
}

/// Headless texture source (every key maps to the default handle)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextures;

impl TextureSource for NoTextures {
    fn texture(&self, _key: &str) -> TextureHandle {
        TextureHandle::default()
    }
}

/// Axis-aligned box entity (brick, paddle, and the base of ball/power-up)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Sprite tint
    pub color: Vec3,
    /// Solid bricks cannot be destroyed
    pub solid: bool,
    pub destroyed: bool,
    pub texture: TextureHandle,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            color: WHITE,
            solid: false,
            destroyed: false,
            texture: TextureHandle::default(),
        }
    }

    /// A breakable brick with the given tint
    pub fn brick(pos: Vec2, size: Vec2, color: Vec3) -> Self {
        Self {
            color,
            ..Self::new(pos, size)
        }
    }

    /// An indestructible brick
    pub fn solid_brick(pos: Vec2, size: Vec2, color: Vec3) -> Self {
        Self {
            color,
            solid: true,
            ..Self::new(pos, size)
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        box_center(self.pos, self.size)
    }
}

/// The ball: a box of size `2 * radius` plus effect flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: Body,
    pub radius: f32,
    /// Glued to the paddle; motion is a no-op
    pub stuck: bool,
    /// Sticky paddle effect: catch the ball on the next bounce
    pub sticky: bool,
    /// Pass-through effect: destroy bricks without reflecting
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        assert!(radius > 0.0, "ball radius must be positive, got {radius}");
        let mut body = Body::new(pos, Vec2::splat(radius * 2.0));
        body.vel = vel;
        Self {
            body,
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.pos + Vec2::splat(self.radius)
    }

    /// Put the ball back on the paddle
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.body.pos = pos;
        self.body.vel = vel;
        self.stuck = true;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    /// All kinds, in spawn-roll order
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    /// Confuse and chaos hurt the player and spawn more often
    pub fn is_negative(self) -> bool {
        matches!(self, PowerUpKind::Confuse | PowerUpKind::Chaos)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Sticky => "sticky",
            PowerUpKind::PassThrough => "pass-through",
            PowerUpKind::PadSizeIncrease => "pad-size-increase",
            PowerUpKind::Confuse => "confuse",
            PowerUpKind::Chaos => "chaos",
        }
    }

    /// Resource key for the power-up sprite
    pub fn texture_key(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "tex_speed",
            PowerUpKind::Sticky => "tex_sticky",
            PowerUpKind::PassThrough => "tex_pass",
            PowerUpKind::PadSizeIncrease => "tex_increase",
            PowerUpKind::Confuse => "tex_confuse",
            PowerUpKind::Chaos => "tex_chaos",
        }
    }

    pub fn color(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    fn index(self) -> usize {
        match self {
            PowerUpKind::Speed => 0,
            PowerUpKind::Sticky => 1,
            PowerUpKind::PassThrough => 2,
            PowerUpKind::PadSizeIncrease => 3,
            PowerUpKind::Confuse => 4,
            PowerUpKind::Chaos => 5,
        }
    }
}

/// Power-up sprite handles, resolved once from a `TextureSource`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerUpTextures([TextureHandle; 6]);

impl PowerUpTextures {
    pub fn from_source(source: &impl TextureSource) -> Self {
        let mut handles = [TextureHandle::default(); 6];
        for kind in PowerUpKind::ALL {
            handles[kind.index()] = source.texture(kind.texture_key());
        }
        Self(handles)
    }

    pub fn get(&self, kind: PowerUpKind) -> TextureHandle {
        self.0[kind.index()]
    }
}

/// A falling power-up
///
/// `destroyed && activated` means collected and still counting down;
/// only `destroyed && !activated` is removed from the live collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    /// Remaining effect time (seconds)
    pub duration: f32,
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, duration: f32, pos: Vec2, tuning: &Tuning) -> Self {
        let mut body = Body::new(pos, tuning.powerup_size);
        body.vel = tuning.powerup_velocity;
        body.color = kind.color();
        Self {
            body,
            kind,
            duration,
            activated: false,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.body.destroyed && !self.activated
    }
}

/// Flags consumed by the post-processing renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenEffects {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
}

/// A level: bricks in load order. Destroyed bricks stay in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub bricks: Vec<Body>,
}

impl Level {
    pub fn new(bricks: Vec<Body>) -> Self {
        Self { bricks }
    }

    /// All breakable bricks are gone
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }

    /// Restore every brick
    pub fn reset(&mut self) {
        for brick in &mut self.bricks {
            brick.destroyed = false;
        }
    }
}

/// Complete game state, owned by the tick orchestrator
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Power-up spawn RNG
    pub rng: Pcg32,
    /// Play-field dimensions
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub paddle: Body,
    pub ball: Ball,
    pub levels: Vec<Level>,
    pub current_level: usize,
    /// Live power-ups (falling or collected-and-timing)
    pub power_ups: Vec<PowerUp>,
    pub effects: ScreenEffects,
    /// Remaining screen-shake time (seconds)
    pub shake_time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub textures: PowerUpTextures,
}

impl GameState {
    /// Create a new game on a `width` x `height` field
    pub fn new(width: f32, height: f32, levels: Vec<Level>, tuning: Tuning, seed: u64) -> Self {
        let paddle = Body::new(
            Self::paddle_start(width, height, tuning.paddle_size),
            tuning.paddle_size,
        );
        let ball = Ball::new(
            Self::ball_start(&paddle, tuning.ball_radius),
            tuning.ball_radius,
            tuning.initial_ball_velocity,
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width,
            height,
            phase: GamePhase::Active,
            paddle,
            ball,
            levels,
            current_level: 0,
            power_ups: Vec::new(),
            effects: ScreenEffects::default(),
            shake_time: 0.0,
            time_ticks: 0,
            textures: PowerUpTextures::default(),
            tuning,
        }
    }

    /// Resolve power-up sprite handles from a resource collaborator
    pub fn with_textures(mut self, source: &impl TextureSource) -> Self {
        self.textures = PowerUpTextures::from_source(source);
        self
    }

    /// The level being played
    pub fn level(&self) -> &Level {
        assert!(
            self.current_level < self.levels.len(),
            "current level {} out of range ({} levels)",
            self.current_level,
            self.levels.len()
        );
        &self.levels[self.current_level]
    }

    pub fn level_mut(&mut self) -> &mut Level {
        assert!(
            self.current_level < self.levels.len(),
            "current level {} out of range ({} levels)",
            self.current_level,
            self.levels.len()
        );
        &mut self.levels[self.current_level]
    }

    /// Paddle back to its start size/position, ball back on top of it
    pub fn reset_player(&mut self) {
        let size = self.tuning.paddle_size;
        self.paddle.size = size;
        self.paddle.pos = Self::paddle_start(self.width, self.height, size);
        let ball_pos = Self::ball_start(&self.paddle, self.ball.radius);
        self.ball.reset(ball_pos, self.tuning.initial_ball_velocity);
    }

    fn paddle_start(width: f32, height: f32, size: Vec2) -> Vec2 {
        Vec2::new(width / 2.0 - size.x / 2.0, height - size.y)
    }

    fn ball_start(paddle: &Body, radius: f32) -> Vec2 {
        paddle.pos + Vec2::new(paddle.size.x / 2.0 - radius, -radius * 2.0)
    }
}
