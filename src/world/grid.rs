//! Rectangular tile grid the caster and the mover read from.
//!
//! * `0` is walkable floor, anything else is a wall whose value selects the
//!   texture page (`id - 1`).
//! * The grid is validated once on construction; after that every lookup is
//!   a plain index, guarded by [`GridMap::in_bounds`] at the call-site.

use std::{fs, path::Path};

use glam::Vec2;
use thiserror::Error;

/// Tile identifier. `EMPTY` is walkable, everything else is solid.
pub type TileId = u16;

pub const EMPTY: TileId = 0;

/// World units covered by one tile on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSize {
    pub x: f32,
    pub y: f32,
}

impl TileSize {
    pub const fn square(s: f32) -> Self {
        Self { x: s, y: s }
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self::square(64.0)
    }
}

/// Things that can go wrong while building a map.
#[derive(Error, Debug)]
pub enum MapError {
    /// Underlying I/O failure – propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No rows, or rows without any tile.
    #[error("map is empty")]
    Empty,

    /// Row `row` has `found` tiles while the first row has `expected`.
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A glyph that is neither empty (`.`, ` `, `0`) nor a wall digit.
    #[error("unknown tile `{glyph}` at ({x}, {y})")]
    BadGlyph { glyph: char, x: usize, y: usize },
}

/// Immutable-per-frame tile array, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMap {
    w: usize,
    h: usize,
    tiles: Vec<TileId>,
    tile_size: TileSize,
}

impl GridMap {
    /// Build a map from row-major `tiles`; `tiles.len()` must be `w * h`.
    pub fn new(w: usize, h: usize, tiles: Vec<TileId>, tile_size: TileSize) -> Result<Self, MapError> {
        if w == 0 || h == 0 {
            return Err(MapError::Empty);
        }
        if tiles.len() != w * h {
            return Err(MapError::Ragged {
                row: tiles.len() / w,
                expected: w,
                found: tiles.len() % w,
            });
        }
        Ok(Self {
            w,
            h,
            tiles,
            tile_size,
        })
    }

    /// Parse the text format: one row per line, `.`/` `/`0` = empty,
    /// `1`..`9` = wall id. Blank lines are skipped.
    pub fn parse(src: &str, tile_size: TileSize) -> Result<Self, MapError> {
        let mut w = 0;
        let mut h = 0;
        let mut tiles = Vec::new();

        for line in src.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            let start = tiles.len();
            for (x, glyph) in line.chars().enumerate() {
                let id = match glyph {
                    '.' | ' ' | '0' => EMPTY,
                    '1'..='9' => glyph.to_digit(10).unwrap_or(0) as TileId,
                    _ => return Err(MapError::BadGlyph { glyph, x, y: h }),
                };
                tiles.push(id);
            }
            let found = tiles.len() - start;
            if h == 0 {
                w = found;
            } else if found != w {
                return Err(MapError::Ragged {
                    row: h,
                    expected: w,
                    found,
                });
            }
            h += 1;
        }

        let map = Self::new(w, h, tiles, tile_size)?;
        log::debug!("parsed {}x{} map", map.w, map.h);
        Ok(map)
    }

    /// Read and parse a map file.
    pub fn load<P: AsRef<Path>>(path: P, tile_size: TileSize) -> Result<Self, MapError> {
        let src = fs::read_to_string(path.as_ref())?;
        let map = Self::parse(&src, tile_size)?;
        log::debug!("loaded map from {}", path.as_ref().display());
        Ok(map)
    }

    /// The map the viewer starts with when no file is given.
    pub fn demo() -> Result<Self, MapError> {
        Self::parse(DEMO_ROWS, TileSize::default())
    }

    /// `(W, H)` in tiles.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    #[inline]
    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// World-space extent of the whole grid.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.w as f32 * self.tile_size.x,
            self.h as f32 * self.tile_size.y,
        )
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h
    }

    /// Tile at `(x, y)`. Caller must have checked [`in_bounds`](Self::in_bounds).
    #[inline]
    pub fn tile_at(&self, x: usize, y: usize) -> TileId {
        debug_assert!(x < self.w && y < self.h, "tile ({x}, {y}) out of bounds");
        self.tiles[y * self.w + x]
    }

    /// Bounds-checked lookup.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<TileId> {
        if self.in_bounds(x, y) {
            Some(self.tile_at(x as usize, y as usize))
        } else {
            None
        }
    }
}

const DEMO_ROWS: &str = "\
1111111111
1........1
1..2..3..1
1........1
1..3.....1
1....1...1
1..2.....1
1......2.1
1........1
1111111111";

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_ids_and_size() {
        let map = GridMap::parse("111\n1.2\n111\n", TileSize::default()).unwrap();
        assert_eq!(map.size(), (3, 3));
        assert_eq!(map.tile_at(1, 1), EMPTY);
        assert_eq!(map.tile_at(2, 1), 2);
        assert_eq!(map.tile_at(0, 0), 1);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = GridMap::parse("111\n11\n", TileSize::default()).unwrap_err();
        assert!(matches!(
            err,
            MapError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn unknown_glyph_rejected() {
        let err = GridMap::parse("1x1\n", TileSize::default()).unwrap_err();
        assert!(matches!(err, MapError::BadGlyph { glyph: 'x', x: 1, y: 0 }));
    }

    #[test]
    fn empty_map_rejected() {
        assert!(matches!(
            GridMap::parse("\n\n", TileSize::default()),
            Err(MapError::Empty)
        ));
    }

    #[test]
    fn checked_lookup_guards_bounds() {
        let map = GridMap::parse("12\n34\n", TileSize::default()).unwrap();
        assert_eq!(map.get(1, 1), Some(4));
        assert_eq!(map.get(-1, 0), None);
        assert_eq!(map.get(0, 2), None);
        assert_eq!(map.get(2, 0), None);
    }

    #[test]
    fn demo_map_goes_through_parse() {
        let map = GridMap::demo().unwrap();
        assert_eq!(map, GridMap::parse(DEMO_ROWS, TileSize::default()).unwrap());
        assert_eq!(map.size(), (10, 10));
        assert_eq!(map.tile_size(), TileSize::square(64.0));
        assert_eq!(map.tile_at(3, 2), 2);
        assert_eq!(map.tile_at(6, 2), 3);
        assert_eq!(map.tile_at(1, 1), EMPTY);
    }

    #[test]
    fn demo_map_is_closed() {
        let map = GridMap::demo().unwrap();
        let (w, h) = map.size();
        for x in 0..w {
            assert_ne!(map.tile_at(x, 0), EMPTY);
            assert_ne!(map.tile_at(x, h - 1), EMPTY);
        }
        for y in 0..h {
            assert_ne!(map.tile_at(0, y), EMPTY);
            assert_ne!(map.tile_at(w - 1, y), EMPTY);
        }
    }
}
