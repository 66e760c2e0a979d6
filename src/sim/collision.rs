//! Axis-separated AABB mover.
//!
//! ✔ X-only and Y-only candidates are tested independently
//! ✔ whichever axis stays clear is applied, so blocked diagonals slide
//! ✘ discrete, not swept: a step of a whole tile or more can skip a wall

use glam::{Vec2, vec2};

use crate::sim::MoveIntent;
use crate::world::{EMPTY, GridMap};

/// What the caller gets back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,       // final XY
    pub x_blocked: bool, // X-only candidate overlapped a wall
    pub y_blocked: bool, // Y-only candidate overlapped a wall
}

impl MoveResult {
    #[inline]
    pub fn hit_wall(&self) -> bool {
        self.x_blocked || self.y_blocked
    }
}

/// Unit wish-direction for `intent` relative to `angle`, or zero.
///
/// Right is the facing rotated +90°, which with y pointing down is the
/// player's right-hand side.
pub fn desired_direction(intent: MoveIntent, angle: f32) -> Vec2 {
    let fwd = Vec2::from_angle(angle);
    let right = fwd.perp();

    let mut dir = Vec2::ZERO;
    if intent.contains(MoveIntent::BACKWARD) {
        dir -= fwd;
    }
    if intent.contains(MoveIntent::FORWARD) {
        dir += fwd;
    }
    if intent.contains(MoveIntent::STRAFE_LEFT) {
        dir -= right;
    }
    if intent.contains(MoveIntent::STRAFE_RIGHT) {
        dir += right;
    }

    // cancelled or idle: no movement this tick
    if dir.length_squared() < 1e-12 {
        return Vec2::ZERO;
    }
    dir / dir.length()
}

/// `p` lies inside the grid on a walkable tile.
#[inline]
pub fn is_walkable(map: &GridMap, p: Vec2) -> bool {
    let tile = map.tile_size();
    let tx = (p.x / tile.x).floor() as i64;
    let ty = (p.y / tile.y).floor() as i64;
    map.get(tx, ty) == Some(EMPTY)
}

/// All four corners of the box `center ± half` are walkable.
pub fn box_fits(map: &GridMap, center: Vec2, half: Vec2) -> bool {
    [
        vec2(center.x - half.x, center.y - half.y),
        vec2(center.x + half.x, center.y - half.y),
        vec2(center.x - half.x, center.y + half.y),
        vec2(center.x + half.x, center.y + half.y),
    ]
    .into_iter()
    .all(|corner| is_walkable(map, corner))
}

/// Move the box at `pos` by `delta`, one axis at a time.
pub fn slide_move(map: &GridMap, pos: Vec2, delta: Vec2, half: Vec2) -> MoveResult {
    let can_x = box_fits(map, vec2(pos.x + delta.x, pos.y), half);
    let can_y = box_fits(map, vec2(pos.x, pos.y + delta.y), half);

    let mut out = pos;
    if can_x {
        out.x += delta.x;
    }
    if can_y {
        out.y += delta.y;
    }

    MoveResult {
        pos: out,
        x_blocked: !can_x,
        y_blocked: !can_y,
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
