pub mod grid;
pub mod pose;
pub mod texture;

pub use grid::{EMPTY, GridMap, MapError, TileId, TileSize};
pub use pose::{Pose, normalize_angle, rad_to_deg};
pub use texture::{PageId, Texture, TextureAtlas, TextureError};
