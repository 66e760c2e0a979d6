//! ---------------------------------------------------------------------------
//! Software (CPU) column renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Every column primitive owns exactly one screen column, so no clipping
//!   state survives between columns.
//! * Also draws the top-down minimap overlay from the frame's ray hits.
//! ---------------------------------------------------------------------------

use crate::{
    engine::RayHit,
    renderer::{
        Band, ColorVertex, FlatColumn, Renderer, Rgba, TexturedColumn, View, lerp_rgb, modulate,
    },
    world::{EMPTY, GridMap, TextureAtlas},
};

const CLEAR: Rgba = 0x00_20_20_20;
const MINIMAP_WALL: Rgba = 0x00_C0_30_30;
const MINIMAP_FLOOR: Rgba = 0x00_10_10_10;
const MINIMAP_RAY: Rgba = 0x00_30_30_FF;
const MINIMAP_PLAYER: Rgba = 0x00_FF_FF_00;
const WEAPON_BODY: Rgba = 0x00_50_50_58;
const WEAPON_FLASH: Rgba = 0x00_FF_D0_40;

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(CLEAR);
    }

    fn draw_flat(&mut self, col: &FlatColumn) {
        let x = col.x as usize;
        self.fill_band(x, &col.sky);
        self.fill_band(x, &col.floor);
        self.fill_band(x, &col.wall);
    }

    fn draw_textured(&mut self, col: &TexturedColumn, atlas: &TextureAtlas) {
        self.fill_pair(&col.ceiling);
        self.fill_pair(&col.floor);

        let Some([top, bot]) = col.wall else {
            return;
        };
        let x = top.pos.x as usize;
        let (y_top, y_bot) = (top.pos.y, bot.pos.y);
        let span = (y_bot - y_top).max(1.0);
        let Some((y0, y1)) = self.clip_rows(y_top, y_bot) else {
            return;
        };
        if x >= self.width {
            return;
        }

        let u = top.uv.x.max(0.0) as usize;
        let dv = (bot.uv.y - top.uv.y) / span;
        for y in y0..y1 {
            // sample at the pixel centre, relative to the unclipped top
            let v = top.uv.y + (y as f32 + 0.5 - y_top) * dv;
            if let Some(texel) = atlas.sample(u, v.max(0.0) as usize) {
                self.scratch[y * self.width + x] = modulate(texel, top.tint);
            }
        }
    }

    fn draw_minimap(&mut self, map: &GridMap, rays: &[RayHit], view: &View, scale: f32) {
        self.minimap(map, rays, view, scale);
    }

    fn draw_weapon(&mut self, frame: u32, bob: f32) {
        self.weapon(frame, bob);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────── column rendering ───────────────────────────*/

impl Software {
    /// Rows of `[top, bottom)` that land on screen, or `None`.
    fn clip_rows(&self, top: f32, bottom: f32) -> Option<(usize, usize)> {
        let y0 = top.max(0.0);
        let y1 = bottom.min(self.height as f32);
        if y0 >= y1 {
            return None;
        }
        Some((y0 as usize, y1 as usize))
    }

    fn fill_band(&mut self, x: usize, band: &Band) {
        if x >= self.width {
            return;
        }
        let Some((y0, y1)) = self.clip_rows(band.top as f32, band.bottom as f32) else {
            return;
        };
        let span = (band.bottom - band.top).max(1) as f32;
        for y in y0..y1 {
            let t = (y as f32 - band.top as f32) / span;
            self.scratch[y * self.width + x] = lerp_rgb(band.color_top, band.color_bottom, t);
        }
    }

    /// Solid fill between two vertices on the same column (any order).
    fn fill_pair(&mut self, pair: &[ColorVertex; 2]) {
        let [a, b] = pair;
        let (top, bottom) = if a.pos.y <= b.pos.y { (a, b) } else { (b, a) };
        let band = Band {
            top: top.pos.y as i32,
            bottom: bottom.pos.y as i32,
            color_top: top.color,
            color_bottom: bottom.color,
        };
        self.fill_band(a.pos.x as usize, &band);
    }

    /*──────────────────────── minimap overlay ──────────────────────────*/

    /// Top-down grid at `scale` pixels per world unit, the ray fan, and the
    /// player marker.
    fn minimap(&mut self, map: &GridMap, rays: &[RayHit], view: &View, scale: f32) {
        let (mw, mh) = map.size();
        let tile = map.tile_size();
        let (cw, ch) = (
            (tile.x * scale).max(1.0) as usize,
            (tile.y * scale).max(1.0) as usize,
        );

        for ty in 0..mh {
            for tx in 0..mw {
                let colour = if map.tile_at(tx, ty) == EMPTY {
                    MINIMAP_FLOOR
                } else {
                    MINIMAP_WALL
                };
                for py in ty * ch..((ty + 1) * ch).min(self.height) {
                    for px in tx * cw..((tx + 1) * cw).min(self.width) {
                        self.scratch[py * self.width + px] = colour;
                    }
                }
            }
        }

        let to_px = |p: glam::Vec2| ((p.x * scale) as i32, (p.y * scale) as i32);
        let (x0, y0) = to_px(view.pos);
        // misses can land far outside the grid; cap the fan at the map diagonal
        let reach = map.world_size().length();
        for hit in rays.iter().filter(|h| h.point.is_finite()) {
            let end = view.pos + (hit.point - view.pos).clamp_length_max(reach);
            let (x1, y1) = to_px(end);
            self.draw_line(x0, y0, x1, y1, MINIMAP_RAY);
        }

        let (fx, fy) = to_px(view.pos + view.facing() * tile.x * 0.5);
        self.draw_line(x0, y0, fx, fy, MINIMAP_PLAYER);
        for dy in -1..=1 {
            for dx in -1..=1 {
                self.put(x0 + dx, y0 + dy, MINIMAP_PLAYER);
            }
        }
    }

    /*──────────────────────── weapon overlay ───────────────────────────*/

    /// Placeholder gun: a barrel block at the bottom centre, with a muzzle
    /// flash on the odd frames of the fire animation.
    fn weapon(&mut self, frame: u32, bob: f32) {
        let (w, h) = (self.width as i32, self.height as i32);
        let gw = (w / 12).max(2);
        let gh = (h / 4).max(2);
        let x0 = (w - gw) / 2;
        let y0 = h - gh + bob as i32;

        if frame % 2 == 1 {
            for y in y0 - gw / 2..y0 {
                for x in x0..x0 + gw {
                    self.put(x, y, WEAPON_FLASH);
                }
            }
        }
        for y in y0..h {
            for x in x0..x0 + gw {
                self.put(x, y, WEAPON_BODY);
            }
        }
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, colour: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = colour;
        }
    }

    /// Integer Bresenham line-drawing algorithm.
    fn draw_line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, colour: Rgba) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x0, y0, colour);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                if x0 == x1 {
                    break;
                }
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                if y0 == y1 {
                    break;
                }
                err += dx;
                y0 += sy;
            }
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::{Columns, Frame, RendererExt, TexVertex, rgb},
        world::Texture,
    };
    use glam::Vec2;

    fn blue_atlas() -> TextureAtlas {
        let mut atlas = TextureAtlas::new(4, 4);
        atlas
            .insert(Texture {
                name: "BLUE".into(),
                w: 4,
                h: 4,
                pixels: vec![0x00_0000FF; 16],
            })
            .unwrap();
        atlas
    }

    fn grab(sw: &mut Software) -> Vec<Rgba> {
        let mut out = Vec::new();
        sw.end_frame(|fb, _, _| out.extend_from_slice(fb));
        out
    }

    #[test]
    fn flat_column_fills_three_bands() {
        let mut sw = Software::default();
        sw.begin_frame(2, 8);
        sw.draw_flat(&FlatColumn {
            x: 1,
            sky: Band::solid(0, 2, rgb(1, 1, 1)),
            wall: Band::solid(2, 6, rgb(0, 0, 150)),
            floor: Band::solid(6, 8, rgb(2, 2, 2)),
        });
        let fb = grab(&mut sw);
        let col: Vec<Rgba> = (0..8).map(|y| fb[y * 2 + 1]).collect();
        assert_eq!(col[0], rgb(1, 1, 1));
        assert_eq!(col[3], rgb(0, 0, 150));
        assert_eq!(col[7], rgb(2, 2, 2));
        assert_eq!(fb[0], CLEAR, "column 0 untouched");
    }

    #[test]
    fn oversized_band_is_clipped() {
        let mut sw = Software::default();
        sw.begin_frame(1, 4);
        sw.draw_flat(&FlatColumn {
            x: 0,
            sky: Band::solid(-100, -50, 0),
            wall: Band::solid(-1000, 1000, rgb(9, 9, 9)),
            floor: Band::solid(50, 100, 0),
        });
        assert!(grab(&mut sw).iter().all(|&px| px == rgb(9, 9, 9)));
    }

    #[test]
    fn textured_column_samples_atlas() {
        let atlas = blue_atlas();
        let frame = Frame {
            width: 4,
            height: 8,
            rays: Vec::new(),
            columns: Columns::Textured(vec![TexturedColumn {
                wall: Some([
                    TexVertex {
                        pos: Vec2::new(2.0, 2.0),
                        uv: Vec2::new(1.0, 0.0),
                        tint: rgb(255, 255, 255),
                    },
                    TexVertex {
                        pos: Vec2::new(2.0, 6.0),
                        uv: Vec2::new(1.0, 4.0),
                        tint: rgb(255, 255, 255),
                    },
                ]),
                floor: [
                    ColorVertex { pos: Vec2::new(2.0, 6.0), color: rgb(64, 64, 64) },
                    ColorVertex { pos: Vec2::new(2.0, 8.0), color: rgb(64, 64, 64) },
                ],
                ceiling: [
                    ColorVertex { pos: Vec2::new(2.0, 2.0), color: rgb(135, 106, 235) },
                    ColorVertex { pos: Vec2::new(2.0, 0.0), color: rgb(135, 106, 235) },
                ],
            }]),
        };

        let mut sw = Software::default();
        let mut fb = Vec::new();
        sw.draw_frame(&frame, &atlas, |buf, _, _| fb.extend_from_slice(buf));

        assert_eq!(fb[2], rgb(135, 106, 235));
        assert_eq!(fb[3 * 4 + 2], 0x00_0000FF);
        assert_eq!(fb[7 * 4 + 2], rgb(64, 64, 64));
    }

    #[test]
    fn minimap_marks_player() {
        let map = GridMap::demo().unwrap();
        let mut sw = Software::default();
        sw.begin_frame(64, 64);
        let view = View {
            pos: Vec2::new(96.0, 96.0),
            heading_deg: -90.0,
        };
        sw.draw_minimap(&map, &[], &view, 0.1);
        let fb = grab(&mut sw);
        assert_eq!(fb[9 * 64 + 9], MINIMAP_PLAYER);
        assert_eq!(fb[0], MINIMAP_WALL);
    }

    #[test]
    fn weapon_rises_with_bob_and_flashes() {
        let mut sw = Software::default();
        sw.begin_frame(24, 16);
        sw.draw_weapon(0, 0.0);
        let idle = grab(&mut sw);
        assert_eq!(idle[15 * 24 + 12], WEAPON_BODY);
        assert_eq!(idle[11 * 24 + 12], CLEAR, "gun top sits at row 12");

        sw.begin_frame(24, 16);
        sw.draw_weapon(1, -2.0);
        let fired = grab(&mut sw);
        assert_eq!(fired[10 * 24 + 12], WEAPON_BODY);
        assert_eq!(fired[9 * 24 + 12], WEAPON_FLASH);
    }
}
