//! Collision detection for axis-aligned geometry
//!
//! Two tests drive the whole game: box-vs-box overlap (paddle picking up
//! power-ups) and circle-vs-box closest point (ball against paddle and bricks).
//! Both use inclusive bounds, so touching counts as contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Body;

/// Cardinal direction of a contact, in enumeration (tie-break) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// True for the horizontal pair
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Compass vectors, checked in this order. Earlier entries win exact ties.
const COMPASS: [(Direction, Vec2); 4] = [
    (Direction::Up, Vec2::new(0.0, 1.0)),
    (Direction::Right, Vec2::new(1.0, 0.0)),
    (Direction::Down, Vec2::new(0.0, -1.0)),
    (Direction::Left, Vec2::new(-1.0, 0.0)),
];

/// Direction used when the contact vector is degenerate (ball center on or inside the box)
pub const FALLBACK_DIRECTION: Direction = Direction::Down;

/// Result of a circle-vs-box check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionResult {
    Miss,
    Hit {
        /// Classified contact direction
        direction: Direction,
        /// Closest box point minus circle center
        difference: Vec2,
    },
}

impl CollisionResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, CollisionResult::Hit { .. })
    }
}

/// Classify a vector by its best-matching compass direction
///
/// Returns `None` for a zero-length (or non-finite) vector, where no
/// compass cosine is strictly positive.
pub fn classify_direction(target: Vec2) -> Option<Direction> {
    let normalized = target.normalize_or_zero();
    let mut max_cosine = 0.0;
    let mut best = None;
    for (direction, compass) in COMPASS {
        let cosine = normalized.dot(compass);
        if cosine > max_cosine {
            max_cosine = cosine;
            best = Some(direction);
        }
    }
    best
}

/// Inclusive AABB overlap on both axes
pub fn box_overlap(a: &Body, b: &Body) -> bool {
    let overlap_x = a.pos.x + a.size.x >= b.pos.x && b.pos.x + b.size.x >= a.pos.x;
    let overlap_y = a.pos.y + a.size.y >= b.pos.y && b.pos.y + b.size.y >= a.pos.y;
    overlap_x && overlap_y
}

/// Circle vs box via the closest point on the box to the circle center
pub fn circle_box_collision(center: Vec2, radius: f32, target: &Body) -> CollisionResult {
    let half_extent = target.size / 2.0;
    let box_center = target.center();

    let offset = center - box_center;
    let clamped = offset.clamp(-half_extent, half_extent);
    let closest = box_center + clamped;
    let difference = closest - center;

    if difference.length() > radius {
        return CollisionResult::Miss;
    }

    let direction = classify_direction(difference).unwrap_or(FALLBACK_DIRECTION);
    CollisionResult::Hit {
        direction,
        difference,
    }
}
