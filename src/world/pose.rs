use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Wrap any real angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    let r = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if r >= TAU { 0.0 } else { r }
}

#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    (180.0 / PI) * rad
}

/// Logical player pose in world space.
///
/// * `angle` is radians, `0` = +X (east), growing towards +Y. With the
///   screen's y-down convention that reads clockwise.
/// * The facing vector is always derived from `angle`, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    angle: f32,
}

impl Pose {
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self {
            position,
            angle: normalize_angle(angle),
        }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_angle(angle);
    }

    /// Rotate by `delta` radians.
    pub fn turn(&mut self, delta: f32) {
        self.set_angle(self.angle + delta);
    }

    /// Unit facing vector `(cos, sin)`.
    #[inline(always)]
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn normalize_stays_in_range() {
        for a in [-100.0, -TAU, -PI, -1e-9, 0.0, 1.0, PI, TAU, 7.5, 1e4] {
            let n = normalize_angle(a);
            assert!((0.0..TAU).contains(&n), "{a} -> {n}");
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for a in [-3.0, 0.25, 4.0, 13.0] {
            let once = normalize_angle(a);
            assert_eq!(normalize_angle(once), once);
        }
    }

    #[test]
    fn normalize_wraps_negatives() {
        assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn direction_follows_angle() {
        let mut pose = Pose::new(Vec2::ZERO, 0.0);
        assert!((pose.direction() - Vec2::X).length() < 1e-6);
        pose.turn(FRAC_PI_2);
        assert!((pose.direction() - Vec2::Y).length() < 1e-6);
        pose.turn(-PI);
        assert!((pose.angle() - 3.0 * FRAC_PI_2).abs() < 1e-5);
    }
}
