use glam::Vec2;

use crate::{
    engine::{
        raycast::{RayHit, Side, final_hit},
        types::Screen,
    },
    renderer::{
        Band, ColorVertex, Columns, FlatColumn, Frame, Rgba, TexVertex, TexturedColumn, rgb,
    },
    world::{GridMap, Pose, TextureAtlas, normalize_angle},
};

/// Default horizontal field of view (≈ 60°).
pub const DEFAULT_FOV: f32 = 1.0472;

const SKY_TOP: Rgba = rgb(135, 106, 235);
const SKY_HORIZON: Rgba = rgb(135, 106, 125);
const FLOOR_NEAR: Rgba = rgb(32, 32, 32);
const FLOOR_FAR: Rgba = rgb(64, 64, 64);
const WALL_VERTICAL: Rgba = rgb(0, 0, 150);
const WALL_HORIZONTAL: Rgba = rgb(0, 0, 100);
const TINT_VERTICAL: Rgba = rgb(255, 255, 255);
const TINT_HORIZONTAL: Rgba = rgb(200, 200, 200);

/// Column output flavour, each with its own projection constant `K`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Solid bands, gradient sky and floor.
    Flat,
    /// Atlas-sampled wall quads, flat sky and floor.
    Textured,
}

impl ProjectionMode {
    #[inline]
    pub fn k(self) -> f32 {
        match self {
            ProjectionMode::Flat => 25.0,
            ProjectionMode::Textured => 100.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Flat => ProjectionMode::Textured,
            ProjectionMode::Textured => ProjectionMode::Flat,
        }
    }
}

/// Remove the fisheye bow: project the ray length onto the view axis.
#[inline]
pub fn corrected_distance(distance: f32, ray_angle: f32, view_angle: f32) -> f32 {
    distance * (ray_angle - view_angle).cos()
}

/// Sweeps one ray per screen column and turns the hits into draw primitives.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    pub screen: Screen,
    pub fov: f32,
    pub mode: ProjectionMode,
    pub texture_w: usize,
    pub texture_h: usize,
}

impl Projector {
    pub fn new(screen: Screen, fov: f32, mode: ProjectionMode) -> Self {
        Self {
            screen,
            fov,
            mode,
            texture_w: 64,
            texture_h: 64,
        }
    }

    /// Take the page size from `atlas`.
    pub fn with_atlas(mut self, atlas: &TextureAtlas) -> Self {
        self.texture_w = atlas.page_w();
        self.texture_h = atlas.page_h();
        self
    }

    /// Ray angle for screen column `col`.
    #[inline]
    pub fn column_angle(&self, view_angle: f32, col: usize) -> f32 {
        let step = self.fov / self.screen.w as f32;
        normalize_angle(view_angle - self.fov * 0.5 + col as f32 * step)
    }

    /// Half the wall height in pixels for a corrected distance.
    #[inline]
    pub fn wall_half_height(&self, corrected: f32) -> f32 {
        (self.screen.half_h / corrected * self.mode.k()).floor()
    }

    /// One hit per column, left to right.
    pub fn sweep(&self, map: &GridMap, pose: &Pose) -> Vec<RayHit> {
        (0..self.screen.w)
            .map(|c| {
                let angle = self.column_angle(pose.angle(), c);
                final_hit(pose.position, angle, map, self.texture_w)
            })
            .collect()
    }

    /// Build this frame's primitives from scratch.
    pub fn project(&self, map: &GridMap, pose: &Pose) -> Frame {
        let rays = self.sweep(map, pose);

        let bands = rays.iter().enumerate().map(|(c, hit)| {
            let angle = self.column_angle(pose.angle(), c);
            let half = self.wall_half_height(corrected_distance(hit.distance, angle, pose.angle()));
            // f32 → i32 casts saturate, so huge walls stay well defined
            let top = (self.screen.half_h - half) as i32;
            let bottom = (self.screen.half_h + half) as i32;
            (c, hit, top, bottom)
        });

        let columns = match self.mode {
            ProjectionMode::Flat => Columns::Flat(
                bands
                    .map(|(c, hit, top, bottom)| self.flat_column(c, hit, top, bottom))
                    .collect(),
            ),
            ProjectionMode::Textured => Columns::Textured(
                bands
                    .map(|(c, hit, top, bottom)| self.textured_column(c, hit, top, bottom))
                    .collect(),
            ),
        };

        Frame {
            width: self.screen.w,
            height: self.screen.h,
            rays,
            columns,
        }
    }

    fn flat_column(&self, c: usize, hit: &RayHit, top: i32, bottom: i32) -> FlatColumn {
        let wall_color = match (hit.is_wall(), hit.side) {
            (false, _) => SKY_HORIZON,
            (true, Side::Vertical) => WALL_VERTICAL,
            (true, Side::Horizontal) => WALL_HORIZONTAL,
        };
        FlatColumn {
            x: c as u32,
            sky: Band {
                top: 0,
                bottom: top,
                color_top: SKY_TOP,
                color_bottom: SKY_HORIZON,
            },
            wall: Band::solid(top, bottom, wall_color),
            floor: Band {
                top: bottom,
                bottom: self.screen.h as i32,
                color_top: FLOOR_FAR,
                color_bottom: FLOOR_NEAR,
            },
        }
    }

    fn textured_column(&self, c: usize, hit: &RayHit, top: i32, bottom: i32) -> TexturedColumn {
        let x = c as f32;
        let (ceiling_px, ground_px) = (top as f32, bottom as f32);

        let wall = TextureAtlas::page_for_tile(hit.tile_id).map(|page| {
            let u = hit.texture_u.floor() + page as f32 * self.texture_w as f32;
            let tint = match hit.side {
                Side::Vertical => TINT_VERTICAL,
                Side::Horizontal => TINT_HORIZONTAL,
            };
            [
                TexVertex {
                    pos: Vec2::new(x, ceiling_px),
                    uv: Vec2::new(u, 0.0),
                    tint,
                },
                TexVertex {
                    pos: Vec2::new(x, ground_px),
                    uv: Vec2::new(u, self.texture_h as f32),
                    tint,
                },
            ]
        });

        TexturedColumn {
            wall,
            floor: [
                ColorVertex {
                    pos: Vec2::new(x, ground_px),
                    color: FLOOR_FAR,
                },
                ColorVertex {
                    pos: Vec2::new(x, self.screen.h as f32),
                    color: FLOOR_FAR,
                },
            ],
            ceiling: [
                ColorVertex {
                    pos: Vec2::new(x, ceiling_px),
                    color: SKY_TOP,
                },
                ColorVertex {
                    pos: Vec2::new(x, 0.0),
                    color: SKY_TOP,
                },
            ],
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
