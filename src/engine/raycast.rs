//! Analytic grid-line ray casting.
//!
//! A ray is walked twice, once across each family of grid lines:
//!
//! ```text
//!   ray_x_hit : crosses x = k·Tx   (vertical lines,   Side::Vertical)
//!   ray_y_hit : crosses y = k·Ty   (horizontal lines, Side::Horizontal)
//! ```
//!
//! Each walk seeds the first line in the travel direction and then jumps a
//! whole tile per step, so a wall is found in at most [`MAX_STEPS`] lookups
//! regardless of map size. The nearer of the two results is the column's hit.

use glam::{Vec2, vec2};
use std::f32::consts::{FRAC_PI_2, PI};

use crate::world::{EMPTY, GridMap, TileId};

/// Grid lines a single walk may cross before giving up.
pub const MAX_STEPS: u32 = 8;

/// Nudge (world units) applied when stepping towards negative coordinates so
/// the seed point lands inside the next tile instead of on its boundary.
pub const EPSILON: f32 = 1e-4;

const THREE_HALF_PI: f32 = 3.0 * FRAC_PI_2;

/// Which family of grid lines produced a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Crossed a line `x = const`.
    Vertical,
    /// Crossed a line `y = const`.
    Horizontal,
}

/// Nearest wall along one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    pub distance: f32,
    pub side: Side,
    /// Texel column on the hit surface, in `[0, texture_w)`.
    pub texture_u: f32,
    /// `EMPTY` when the walk ran out of steps or left the grid.
    pub tile_id: TileId,
}

impl RayHit {
    #[inline]
    pub fn is_wall(&self) -> bool {
        self.tile_id != EMPTY
    }
}

/// Euclidean distance.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Walk the vertical grid lines. `None` when the ray runs parallel to them.
pub fn ray_x_hit(origin: Vec2, angle: f32, map: &GridMap) -> Option<Vec2> {
    x_walk(origin, angle, map).map(|(p, _)| p)
}

/// Walk the horizontal grid lines. `None` when the ray runs parallel to them.
pub fn ray_y_hit(origin: Vec2, angle: f32, map: &GridMap) -> Option<Vec2> {
    y_walk(origin, angle, map).map(|(p, _)| p)
}

/// Cast both walks and keep the nearer one; `Horizontal` wins exact ties.
///
/// `texture_w` is the page width used to derive [`RayHit::texture_u`].
pub fn final_hit(origin: Vec2, angle: f32, map: &GridMap, texture_w: usize) -> RayHit {
    let tile = map.tile_size();

    let x_hit = ray_x_hit(origin, angle, map).map(|p| (p, distance(origin, p)));
    let y_hit = ray_y_hit(origin, angle, map).map(|p| (p, distance(origin, p)));

    // at most one walk is degenerate for any angle, so the winner has a point
    let (point, distance, side) =
        nearest(x_hit, y_hit).unwrap_or((origin, f32::INFINITY, Side::Horizontal));

    let tex = texture_w as f32;
    let (off_axis, span, cell) = match side {
        Side::Vertical => (point.y, tile.y, Vec2::splat(tile.x)),
        Side::Horizontal => (point.x, tile.x, Vec2::splat(tile.y)),
    };
    let texture_u = if tex > 0.0 && off_axis.is_finite() {
        let u = (off_axis * (tex / span)).rem_euclid(tex);
        if u >= tex { 0.0 } else { u }
    } else {
        0.0
    };

    let tile_id = tile_index(point, cell)
        .and_then(|(tx, ty)| map.get(tx, ty))
        .unwrap_or(EMPTY);

    RayHit {
        point,
        distance,
        side,
        texture_u,
        tile_id,
    }
}

/// Nearer of the two walks as `(point, distance, side)`. A missing walk
/// counts as infinitely far; equal distances go to `Horizontal`.
fn nearest(
    x_hit: Option<(Vec2, f32)>,
    y_hit: Option<(Vec2, f32)>,
) -> Option<(Vec2, f32, Side)> {
    match (x_hit, y_hit) {
        (Some((p, dx)), Some((_, dy))) if dx < dy => Some((p, dx, Side::Vertical)),
        (_, Some((p, dy))) => Some((p, dy, Side::Horizontal)),
        (Some((p, dx)), None) => Some((p, dx, Side::Vertical)),
        (None, None) => None,
    }
}

/*──────────────────────── grid-line walks ────────────────────────────*/

fn x_walk(origin: Vec2, angle: f32, map: &GridMap) -> Option<(Vec2, u32)> {
    let tw = map.tile_size().x;
    let slope = -angle.tan();

    let (seed_x, step_x) = if angle > FRAC_PI_2 && angle < THREE_HALF_PI {
        ((origin.x / tw).floor() * tw - EPSILON, -tw)
    } else if angle < FRAC_PI_2 || angle > THREE_HALF_PI {
        ((origin.x / tw).floor() * tw + tw, tw)
    } else {
        return None;
    };
    let seed = vec2(seed_x, (origin.x - seed_x) * slope + origin.y);
    let step = vec2(step_x, -step_x * slope);

    // Both indices use the tile *width*; kept as-is, see DESIGN.md.
    Some(walk(seed, step, Vec2::splat(tw), map))
}

fn y_walk(origin: Vec2, angle: f32, map: &GridMap) -> Option<(Vec2, u32)> {
    let th = map.tile_size().y;
    let slope = -1.0 / angle.tan();

    let (seed_y, step_y) = if angle > PI {
        ((origin.y / th).floor() * th - EPSILON, -th)
    } else if angle > 0.0 && angle < PI {
        ((origin.y / th).floor() * th + th, th)
    } else {
        return None;
    };
    let seed = vec2((origin.y - seed_y) * slope + origin.x, seed_y);
    let step = vec2(-step_y * slope, step_y);

    Some(walk(seed, step, Vec2::splat(th), map))
}

/// Step from `pos` until a wall, the grid edge or the step cap.
/// Returns the last point and how many steps were taken.
fn walk(mut pos: Vec2, step: Vec2, cell: Vec2, map: &GridMap) -> (Vec2, u32) {
    let mut steps = 0;
    while steps < MAX_STEPS {
        let open = tile_index(pos, cell)
            .and_then(|(tx, ty)| map.get(tx, ty))
            .is_some_and(|id| id == EMPTY);
        if !open {
            break;
        }
        pos += step;
        steps += 1;
    }
    (pos, steps)
}

#[inline]
fn tile_index(p: Vec2, cell: Vec2) -> Option<(i64, i64)> {
    if !p.is_finite() {
        return None;
    }
    Some(((p.x / cell.x).floor() as i64, (p.y / cell.y).floor() as i64))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
