//! Power-up spawning, pickup, timers and expiry
//!
//! Effects of the same kind stack: a timed effect stays on while at least
//! one activated power-up of that kind is still counting down.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::collision::box_overlap;
use super::state::{Ball, Body, PowerUp, PowerUpKind, PowerUpTextures, ScreenEffects};
use crate::WHITE;
use crate::tuning::Tuning;

/// Paddle tint while the sticky effect is on
const STICKY_TINT: Vec3 = Vec3::new(1.0, 0.5, 1.0);
/// Ball tint while the pass-through effect is on
const PASS_THROUGH_TINT: Vec3 = Vec3::new(1.0, 0.5, 0.5);

/// Source of 1-in-N spawn decisions
pub trait SpawnRoll {
    /// True with probability `1 / chance`. A chance of 0 or 1 always spawns.
    fn should_spawn(&mut self, chance: u32) -> bool;
}

impl<R: Rng> SpawnRoll for R {
    fn should_spawn(&mut self, chance: u32) -> bool {
        chance <= 1 || self.random_range(0..chance) == 0
    }
}

/// Entities a power-up effect can touch
pub struct EffectTargets<'a> {
    pub ball: &'a mut Ball,
    pub paddle: &'a mut Body,
    pub effects: &'a mut ScreenEffects,
}

/// Roll every kind independently at a destroyed brick's position.
///
/// Returns how many power-ups were spawned.
pub fn spawn_power_ups<R: SpawnRoll + ?Sized>(
    roll: &mut R,
    tuning: &Tuning,
    textures: &PowerUpTextures,
    pos: Vec2,
    power_ups: &mut Vec<PowerUp>,
) -> usize {
    let mut spawned = 0;
    for kind in PowerUpKind::ALL {
        if roll.should_spawn(tuning.spawn_chance_for(kind)) {
            let mut power_up = PowerUp::new(kind, tuning.duration_for(kind), pos, tuning);
            power_up.body.texture = textures.get(kind);
            power_ups.push(power_up);
            spawned += 1;
            log::debug!("spawned {} power-up at {:?}", kind.as_str(), pos);
        }
    }
    spawned
}

/// Apply a power-up's effect immediately
pub fn activate(kind: PowerUpKind, targets: &mut EffectTargets<'_>, tuning: &Tuning) {
    match kind {
        PowerUpKind::Speed => {
            targets.ball.body.vel *= tuning.speed_factor;
        }
        PowerUpKind::Sticky => {
            targets.ball.sticky = true;
            targets.paddle.color = STICKY_TINT;
        }
        PowerUpKind::PassThrough => {
            targets.ball.pass_through = true;
            targets.ball.body.color = PASS_THROUGH_TINT;
        }
        PowerUpKind::PadSizeIncrease => {
            targets.paddle.size.x += tuning.pad_size_increase;
        }
        PowerUpKind::Confuse => {
            targets.effects.confuse = true;
        }
        PowerUpKind::Chaos => {
            targets.effects.chaos = true;
        }
    }
    log::debug!("activated {} power-up", kind.as_str());
}

/// Undo a timed effect. Speed and pad size are permanent.
pub fn deactivate(kind: PowerUpKind, targets: &mut EffectTargets<'_>) {
    match kind {
        PowerUpKind::Sticky => {
            targets.ball.sticky = false;
            targets.paddle.color = WHITE;
        }
        PowerUpKind::PassThrough => {
            targets.ball.pass_through = false;
            targets.ball.body.color = WHITE;
        }
        PowerUpKind::Confuse => {
            targets.effects.confuse = false;
        }
        PowerUpKind::Chaos => {
            targets.effects.chaos = false;
        }
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => return,
    }
    log::debug!("{} effect expired", kind.as_str());
}

/// Any activated power-up of this kind left in the collection
pub fn is_kind_active(power_ups: &[PowerUp], kind: PowerUpKind) -> bool {
    power_ups.iter().any(|p| p.activated && p.kind == kind)
}

/// Collision housekeeping: off-screen power-ups are lost, paddle
/// contact collects (activates and destroys in the same step).
pub fn collect_power_ups(
    power_ups: &mut [PowerUp],
    targets: &mut EffectTargets<'_>,
    field_height: f32,
    tuning: &Tuning,
) {
    for power_up in power_ups.iter_mut().filter(|p| !p.body.destroyed) {
        if power_up.body.pos.y >= field_height {
            power_up.body.destroyed = true;
        }
        if box_overlap(&*targets.paddle, &power_up.body) {
            activate(power_up.kind, targets, tuning);
            power_up.body.destroyed = true;
            power_up.activated = true;
        }
    }
}

/// Advance falling power-ups, count down collected ones, expire effects
/// with the stacking rule, then drop everything `destroyed && !activated`.
pub fn update_power_ups(power_ups: &mut Vec<PowerUp>, targets: &mut EffectTargets<'_>, dt: f32) {
    let mut expired = Vec::new();
    for power_up in power_ups.iter_mut() {
        power_up.body.pos += power_up.body.vel * dt;
        if power_up.activated {
            power_up.duration -= dt;
            if power_up.duration <= 0.0 {
                power_up.activated = false;
                expired.push(power_up.kind);
            }
        }
    }

    for kind in expired {
        if !is_kind_active(power_ups, kind) {
            deactivate(kind, targets);
        }
    }

    power_ups.retain(|p| !p.is_expired());
}
