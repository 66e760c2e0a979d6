pub mod clock;
pub mod collision;
mod intent;
pub mod player;
pub mod weapon;

pub use clock::FrameClock;
pub use collision::{MoveResult, desired_direction, slide_move};
pub use intent::MoveIntent;
pub use player::Player;
pub use weapon::WeaponAnim;
