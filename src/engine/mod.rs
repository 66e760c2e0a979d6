mod engine;
pub mod projection;
pub mod raycast;
pub mod types;

pub use engine::Engine;
pub use projection::{DEFAULT_FOV, ProjectionMode, Projector, corrected_distance};
pub use raycast::{EPSILON, MAX_STEPS, RayHit, Side, distance, final_hit, ray_x_hit, ray_y_hit};
pub use types::Screen;
