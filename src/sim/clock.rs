use std::time::{Duration, Instant};

/// Tile fraction one step may cover at most.
const MAX_STEP_FRACTION: f32 = 0.5;
/// Upper bound for a single frame, whatever the speed.
pub const MAX_DT: f32 = 0.1;

/// Largest `dt` for which `speed * dt` stays below half a tile, so the
/// discrete collision test cannot skip over a wall.
#[inline]
pub fn safe_dt(dt: f32, speed: f32, tile: f32) -> f32 {
    let dt = dt.clamp(0.0, MAX_DT);
    if speed <= 0.0 {
        return dt;
    }
    dt.min(tile * MAX_STEP_FRACTION / speed)
}

/// Variable-rate frame clock: one `tick` per rendered frame.
pub struct FrameClock {
    last: Instant,
    limit: f32,
}

impl FrameClock {
    /// `speed` and `tile` bound every tick via [`safe_dt`].
    pub fn new(speed: f32, tile: f32) -> Self {
        Self {
            last: Instant::now(),
            limit: safe_dt(MAX_DT, speed, tile),
        }
    }

    /// Seconds since the previous tick, clamped.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        self.clamp(dt)
    }

    fn clamp(&self, dt: Duration) -> f32 {
        let secs = dt.as_secs_f32();
        if secs > self.limit {
            log::trace!("frame clock: clamped {secs:.3}s to {:.3}s", self.limit);
        }
        secs.min(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_dt_keeps_steps_under_half_a_tile() {
        assert_eq!(safe_dt(0.016, 50.0, 64.0), 0.016);
        let dt = safe_dt(0.1, 1000.0, 64.0);
        assert!(1000.0 * dt <= 32.0 + 1e-4);
        assert_eq!(safe_dt(-1.0, 50.0, 64.0), 0.0);
        assert_eq!(safe_dt(5.0, 0.0, 64.0), MAX_DT);
    }

    #[test]
    fn long_stalls_are_clamped() {
        let clock = FrameClock::new(50.0, 64.0);
        assert_eq!(clock.clamp(Duration::from_secs(3)), MAX_DT);
        assert!((clock.clamp(Duration::from_millis(16)) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn tick_is_small_right_after_new() {
        let mut clock = FrameClock::new(50.0, 64.0);
        assert!(clock.tick() <= MAX_DT);
    }
}
