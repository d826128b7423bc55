//! Collision response
//!
//! Turns a detected contact into velocity and position changes on the ball.

use glam::Vec2;

use super::collision::{CollisionResult, Direction};
use super::state::{Ball, Body};

/// Advance a free ball and bounce it off the left, right and top edges.
///
/// The bottom edge is open: falling past it is the loss condition.
pub fn advance_ball(ball: &mut Ball, dt: f32, field_width: f32) {
    if ball.stuck {
        return;
    }

    let body = &mut ball.body;
    body.pos += body.vel * dt;

    if body.pos.x <= 0.0 {
        body.pos.x = 0.0;
        body.vel.x = -body.vel.x;
    } else if body.pos.x + body.size.x >= field_width {
        body.pos.x = field_width - body.size.x;
        body.vel.x = -body.vel.x;
    }
    if body.pos.y <= 0.0 {
        body.pos.y = 0.0;
        body.vel.y = -body.vel.y;
    }
}

/// Bounce off the paddle, steering by impact offset from the paddle center.
///
/// Always sends the ball upward and keeps its speed. A sticky ball is caught.
pub fn paddle_bounce(ball: &mut Ball, paddle: &Body, base_velocity: Vec2, strength: f32) {
    let half_width = paddle.size.x / 2.0;
    let paddle_center = paddle.pos.x + half_width;
    let offset = (ball.body.pos.x + ball.radius) - paddle_center;
    let percentage = offset / half_width;

    let old_vel = ball.body.vel;
    let steered = Vec2::new(base_velocity.x * percentage * strength, -old_vel.y.abs());
    ball.body.vel = steered.normalize_or_zero() * old_vel.length();

    ball.stuck = ball.sticky;
}

/// Reflect the ball off a brick along the contact axis and push it out.
///
/// Only one axis is corrected per contact.
pub fn resolve_brick_contact(ball: &mut Ball, contact: CollisionResult) {
    let CollisionResult::Hit {
        direction,
        difference,
    } = contact
    else {
        return;
    };

    let body = &mut ball.body;
    if direction.is_horizontal() {
        body.vel.x = -body.vel.x;
        let penetration = ball.radius - difference.x.abs();
        if direction == Direction::Left {
            body.pos.x += penetration;
        } else {
            body.pos.x -= penetration;
        }
    } else {
        body.vel.y = -body.vel.y;
        let penetration = ball.radius - difference.y.abs();
        if direction == Direction::Up {
            body.pos.y -= penetration;
        } else {
            body.pos.y += penetration;
        }
    }
    log::trace!("brick contact {:?}, ball vel now {:?}", direction, body.vel);
}
