//! Grid-map raycasting engine: analytic wall hits, fisheye-corrected column
//! projection, and an axis-separated AABB mover.

pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
