//! The one moving thing in the world.

use glam::Vec2;

use super::{
    MoveIntent,
    collision::{MoveResult, desired_direction, slide_move},
    weapon::WeaponAnim,
};
use crate::world::{GridMap, Pose};

/// World units per second.
pub const DEFAULT_SPEED: f32 = 50.0;
/// Radians per second for the turn keys.
pub const TURN_RATE: f32 = std::f32::consts::PI;
/// Collision box is `2 * HALF_EXTENT` on each side.
pub const HALF_EXTENT: Vec2 = Vec2::splat(3.0);

#[derive(Clone, Debug)]
pub struct Player {
    pub pose: Pose,
    /// Last applied displacement per second.
    pub velocity: Vec2,
    pub speed: f32,
    pub half_extent: Vec2,
    /// Keys held this frame; set by the input layer before `update`.
    pub intent: MoveIntent,
    pub weapon: WeaponAnim,
}

impl Player {
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            velocity: Vec2::ZERO,
            speed: DEFAULT_SPEED,
            half_extent: HALF_EXTENT,
            intent: MoveIntent::empty(),
            weapon: WeaponAnim::default(),
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn fire(&mut self) -> bool {
        self.weapon.start()
    }

    /// Advance one frame: weapon timer, then wish-direction move with
    /// wall sliding. Only the logical pose changes here.
    pub fn update(&mut self, dt: f32, map: &GridMap) -> MoveResult {
        self.weapon.tick(dt);

        let dir = desired_direction(self.intent, self.pose.angle());
        let delta = dir * self.speed * dt;
        let res = slide_move(map, self.pose.position, delta, self.half_extent);

        if res.hit_wall() {
            log::trace!(
                "player blocked x={} y={} at {:?}",
                res.x_blocked,
                res.y_blocked,
                res.pos
            );
        }
        self.velocity = if dt > 0.0 {
            (res.pos - self.pose.position) / dt
        } else {
            Vec2::ZERO
        };
        self.pose.position = res.pos;
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TileSize;

    const T: f32 = 64.0;

    fn pillar_map() -> GridMap {
        let mut rows = String::new();
        for y in 0..10 {
            for x in 0..10 {
                let wall = x == 0 || y == 0 || x == 9 || y == 9 || (x == 5 && y == 5);
                rows.push(if wall { '1' } else { '.' });
            }
            rows.push('\n');
        }
        GridMap::parse(&rows, TileSize::square(T)).unwrap()
    }

    #[test]
    fn forward_step_moves_along_facing() {
        let map = pillar_map();
        let mut p = Player::new(Pose::new(Vec2::new(3.5 * T, 5.5 * T), 0.0));
        p.intent = MoveIntent::FORWARD;
        let res = p.update(0.1, &map);
        assert!(!res.hit_wall());
        assert!((p.pose.position.x - (3.5 * T + 5.0)).abs() < 1e-4);
        assert_eq!(p.pose.position.y, 5.5 * T);
        assert!((p.velocity.x - 50.0).abs() < 1e-2);
    }

    #[test]
    fn straddling_a_wall_slides() {
        let map = pillar_map();
        // just west of the pillar at tile (5,5), moving north-east
        let start = Vec2::new(5.0 * T - 4.0, 5.5 * T);
        let mut p = Player::new(Pose::new(start, -std::f32::consts::FRAC_PI_4));
        p.intent = MoveIntent::FORWARD;
        let res = p.update(0.1, &map);
        assert!(res.x_blocked);
        assert!(!res.y_blocked);
        assert_eq!(p.pose.position.x, start.x);
        assert!(p.pose.position.y < start.y);
    }

    #[test]
    fn forward_and_strafe_slide_along_wall() {
        let map = pillar_map();
        // box edge half a unit short of the pillar's west face
        let start = Vec2::new(5.0 * T - HALF_EXTENT.x - 0.5, 5.5 * T);
        let mut p = Player::new(Pose::new(start, 0.0));
        p.intent = MoveIntent::FORWARD | MoveIntent::STRAFE_RIGHT;
        let res = p.update(0.1, &map);

        assert!(res.x_blocked);
        assert!(!res.y_blocked);
        assert_eq!(p.pose.position.x, start.x);
        let step = DEFAULT_SPEED * 0.1 / std::f32::consts::SQRT_2;
        assert!((p.pose.position.y - (start.y + step)).abs() < 1e-4);
    }

    #[test]
    fn idle_player_stays_put_but_weapon_runs() {
        let map = pillar_map();
        let start = Vec2::new(2.5 * T, 2.5 * T);
        let mut p = Player::new(Pose::new(start, 1.0));
        assert!(p.fire());
        p.update(0.01, &map);
        assert_eq!(p.pose.position, start);
        assert!(p.weapon.is_firing());
        assert_eq!(p.velocity, Vec2::ZERO);
    }
}
