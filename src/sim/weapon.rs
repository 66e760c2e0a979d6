//! Weapon fire animation: `Idle -> Firing(timer) -> Idle`.
//!
//! Purely cosmetic and independent of movement; the renderer only asks for
//! [`WeaponAnim::current_frame`] and [`WeaponAnim::bob_offset`].

/// Whole fire animation, seconds.
pub const ANIMATION_DURATION: f32 = 0.5;
/// Sprite frames the timer is spread over.
pub const TOTAL_FRAMES: u32 = 5;
/// Peak upward kick of the weapon sprite, pixels.
pub const BOB_HEIGHT: f32 = 40.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum WeaponState {
    #[default]
    Idle,
    /// Seconds left until the animation ends.
    Firing { timer: f32 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeaponAnim {
    state: WeaponState,
    frame: u32,
}

impl WeaponAnim {
    /// Start firing; ignored while an animation is running.
    /// Returns `true` when a new shot started.
    pub fn start(&mut self) -> bool {
        if self.is_firing() {
            return false;
        }
        self.state = WeaponState::Firing {
            timer: ANIMATION_DURATION,
        };
        self.frame = 1;
        log::trace!("weapon: firing");
        true
    }

    /// Advance by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let WeaponState::Firing { timer } = self.state else {
            return;
        };
        let timer = timer - dt;
        if timer <= 0.0 {
            self.state = WeaponState::Idle;
            self.frame = 0;
            log::trace!("weapon: idle");
            return;
        }
        self.state = WeaponState::Firing { timer };

        let frame_time = ANIMATION_DURATION / (TOTAL_FRAMES - 1) as f32;
        let frame = (timer / frame_time) as u32;
        if frame < TOTAL_FRAMES {
            self.frame = frame;
        }
    }

    #[inline]
    pub fn is_firing(&self) -> bool {
        matches!(self.state, WeaponState::Firing { .. })
    }

    #[inline]
    pub fn current_frame(&self) -> u32 {
        self.frame
    }

    /// Vertical sprite offset (negative = up): rises over the first half of
    /// the animation and falls back over the second.
    pub fn bob_offset(&self) -> f32 {
        match self.state {
            WeaponState::Idle => 0.0,
            WeaponState::Firing { timer } => {
                let t = 1.0 - timer / ANIMATION_DURATION;
                if t < 0.5 {
                    -BOB_HEIGHT * t
                } else {
                    -BOB_HEIGHT * (1.0 - t)
                }
            }
        }
    }
}
