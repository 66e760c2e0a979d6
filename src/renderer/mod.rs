//! Rendering abstraction layer.
//!
//! *The rest of the engine never touches a pixel buffer directly.*
//! The projector produces a [`Frame`] (one primitive per screen column) and
//! hands it to a type that implements [`Renderer`].
//!
//! * A `Frame` is built from scratch on every sweep and owned by the caller;
//!   nothing is appended across frames.
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

use glam::Vec2;

use crate::{
    engine::RayHit,
    world::{GridMap, Pose, TextureAtlas, rad_to_deg},
};

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Per-channel multiply, `tint` = white leaves `c` unchanged.
#[inline]
pub fn modulate(c: Rgba, tint: Rgba) -> Rgba {
    let ch = |v: Rgba, s: u32| (v >> s) & 0xFF;
    let mul = |s: u32| (ch(c, s) * ch(tint, s) / 255) << s;
    mul(16) | mul(8) | mul(0)
}

/// Linear blend, `t` in `[0, 1]`.
#[inline]
pub fn lerp_rgb(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let ch = |v: Rgba, s: u32| ((v >> s) & 0xFF) as f32;
    let mix = |s: u32| ((ch(a, s) + (ch(b, s) - ch(a, s)) * t).round() as u32) << s;
    mix(16) | mix(8) | mix(0)
}

/*──────────────────────── flat primitives ──────────────────────────*/

/// Vertical run of pixels `top..bottom` on one column, shaded from
/// `color_top` to `color_bottom`. Bounds may lie off-screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub top: i32,
    pub bottom: i32,
    pub color_top: Rgba,
    pub color_bottom: Rgba,
}

impl Band {
    pub fn solid(top: i32, bottom: i32, color: Rgba) -> Self {
        Self {
            top,
            bottom,
            color_top: color,
            color_bottom: color,
        }
    }
}

/// One screen column in flat-colour mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatColumn {
    pub x: u32,
    pub sky: Band,
    pub wall: Band,
    pub floor: Band,
}

/*────────────────────── textured primitives ─────────────────────────*/

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorVertex {
    pub pos: Vec2,
    pub color: Rgba,
}

/// `uv` is in absolute atlas texels: `u` already includes the page offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexVertex {
    pub pos: Vec2,
    pub uv: Vec2,
    pub tint: Rgba,
}

/// One screen column in textured mode: wall pair (top, bottom), floor pair
/// and ceiling pair. `wall` is `None` when the ray found no wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexturedColumn {
    pub wall: Option<[TexVertex; 2]>,
    pub floor: [ColorVertex; 2],
    pub ceiling: [ColorVertex; 2],
}

#[derive(Clone, Debug, PartialEq)]
pub enum Columns {
    Flat(Vec<FlatColumn>),
    Textured(Vec<TexturedColumn>),
}

/// Everything one sweep produced. Valid for exactly one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    /// Per-column hit, reused by the minimap overlay.
    pub rays: Vec<RayHit>,
    pub columns: Columns,
}

/*──────────────────────────── view ─────────────────────────────────*/

/// Render-side copy of the player pose (minimap marker).
///
/// Updated by an explicit [`View::sync`] once per frame, never as a side
/// effect of moving the player.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct View {
    pub pos: Vec2,
    /// Marker rotation in degrees; the sprite's "up" is the facing.
    pub heading_deg: f32,
}

impl View {
    pub fn sync(&mut self, pose: &Pose) {
        self.pos = pose.position;
        self.heading_deg = rad_to_deg(pose.angle() - std::f32::consts::FRAC_PI_2);
    }

    /// Facing vector recovered from the marker rotation.
    pub fn facing(&self) -> Vec2 {
        Vec2::from_angle((self.heading_deg + 90.0).to_radians())
    }
}

/*─────────────────────────── backend ───────────────────────────────*/

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Fill one flat-colour column.
    fn draw_flat(&mut self, col: &FlatColumn);

    /// Fill one textured column.
    fn draw_textured(&mut self, col: &TexturedColumn, atlas: &TextureAtlas);

    /// Top-down overlay; back-ends without one ignore it.
    fn draw_minimap(&mut self, _map: &GridMap, _rays: &[RayHit], _view: &View, _scale: f32) {}

    /// First-person weapon sprite for animation `frame`, raised by `bob`
    /// pixels (negative = up).
    fn draw_weapon(&mut self, _frame: u32, _bob: f32) {}

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(&mut self, frame: &Frame, atlas: &TextureAtlas, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(frame.width, frame.height);
        self.draw_columns(frame, atlas);
        self.end_frame(submit);
    }

    fn draw_columns(&mut self, frame: &Frame, atlas: &TextureAtlas) {
        match &frame.columns {
            Columns::Flat(cols) => cols.iter().for_each(|c| self.draw_flat(c)),
            Columns::Textured(cols) => cols.iter().for_each(|c| self.draw_textured(c, atlas)),
        }
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;
pub use software::Software;
