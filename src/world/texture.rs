// Repository of wall textures, laid out as equally sized atlas pages.
// Wall tile `id` samples page `id - 1`; the projector only needs the page
// dimensions, the software renderer reads the pixels.

use std::collections::HashMap;

use crate::world::grid::TileId;

/// Index of a page inside the atlas.
pub type PageId = u16;

/// CPU-side storage: 32-bit **0x00RRGGBB** in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u32>,
}

impl Texture {
    /// Two-colour checkerboard with `cell`-pixel squares.
    pub fn checker(name: &str, size: usize, cell: usize, a: u32, b: u32) -> Self {
        let cell = cell.max(1);
        let pixels = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                if ((x / cell) ^ (y / cell)) & 1 == 0 { a } else { b }
            })
            .collect();
        Texture {
            name: name.to_string(),
            w: size,
            h: size,
            pixels,
        }
    }

    /// Running-bond brick pattern with 1-px mortar lines.
    pub fn brick(name: &str, size: usize, brick: u32, mortar: u32) -> Self {
        let row_h = (size / 4).max(2);
        let brick_w = (size / 2).max(2);
        let pixels = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                let row = y / row_h;
                let shift = if row % 2 == 0 { 0 } else { brick_w / 2 };
                if y % row_h == 0 || (x + shift) % brick_w == 0 {
                    mortar
                } else {
                    brick
                }
            })
            .collect();
        Texture {
            name: name.to_string(),
            w: size,
            h: size,
            pixels,
        }
    }

    #[inline]
    pub fn texel(&self, u: usize, v: usize) -> u32 {
        self.pixels[(v % self.h) * self.w + (u % self.w)]
    }
}

/// Things that can go wrong when using the atlas.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second page with an existing name.
    #[error("texture name `{0}` already present in atlas")]
    Duplicate(String),

    /// Page dimensions differ from the atlas page size.
    #[error("texture `{name}` is {w}x{h}, atlas pages are {page_w}x{page_h}")]
    SizeMismatch {
        name: String,
        w: usize,
        h: usize,
        page_w: usize,
        page_h: usize,
    },

    /// Requested page is outside `0 .. atlas.len()`.
    #[error("texture page {0} out of range")]
    BadId(PageId),
}

/// Horizontal strip of equally sized wall pages.
///
/// Page `n` occupies atlas columns `n * page_w .. (n + 1) * page_w`.
pub struct TextureAtlas {
    page_w: usize,
    page_h: usize,
    by_name: HashMap<String, PageId>,
    pages: Vec<Texture>,
}

impl TextureAtlas {
    pub fn new(page_w: usize, page_h: usize) -> Self {
        Self {
            page_w,
            page_h,
            by_name: HashMap::new(),
            pages: Vec::new(),
        }
    }

    /// Procedural stand-ins for the wall art, one per demo tile id.
    pub fn procedural(size: usize) -> Self {
        let pages = vec![
            Texture::brick("BRICK", size, 0x00_8C_3B_2A, 0x00_B0_B0_A0),
            Texture::checker("STONE", size, size / 8, 0x00_70_70_78, 0x00_50_50_58),
            Texture::brick("MOSS", size, 0x00_3A_6B_2E, 0x00_20_30_20),
        ];
        let by_name = pages
            .iter()
            .enumerate()
            .map(|(i, tex)| (tex.name.clone(), i as PageId))
            .collect();
        Self {
            page_w: size,
            page_h: size,
            by_name,
            pages,
        }
    }

    #[inline]
    pub fn page_w(&self) -> usize {
        self.page_w
    }

    #[inline]
    pub fn page_h(&self) -> usize {
        self.page_h
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn id(&self, name: &str) -> Option<PageId> {
        self.by_name.get(name).copied()
    }

    /// Page sampled by wall tile `tile`; `None` for walkable tiles.
    #[inline]
    pub fn page_for_tile(tile: TileId) -> Option<PageId> {
        tile.checked_sub(1)
    }

    /// Borrow a page, with bounds-checking.
    pub fn page(&self, id: PageId) -> Result<&Texture, TextureError> {
        self.pages.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Sample at absolute atlas coordinates (`u` spans all pages).
    /// Pages past the end wrap around so every wall id draws something.
    pub fn sample(&self, u: usize, v: usize) -> Option<u32> {
        if self.pages.is_empty() || self.page_w == 0 || self.page_h == 0 {
            return None;
        }
        let page = (u / self.page_w) % self.pages.len();
        Some(self.pages[page].texel(u % self.page_w, v))
    }

    /// Append a page; returns its id.
    pub fn insert(&mut self, tex: Texture) -> Result<PageId, TextureError> {
        if self.by_name.contains_key(&tex.name) {
            return Err(TextureError::Duplicate(tex.name));
        }
        if tex.w != self.page_w || tex.h != self.page_h {
            return Err(TextureError::SizeMismatch {
                name: tex.name,
                w: tex.w,
                h: tex.h,
                page_w: self.page_w,
                page_h: self.page_h,
            });
        }
        let id = self.pages.len() as PageId;
        self.by_name.insert(tex.name.clone(), id);
        self.pages.push(tex);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn solid(name: &str, size: usize, color: u32) -> Texture {
        Texture {
            name: name.to_string(),
            w: size,
            h: size,
            pixels: vec![color; size * size],
        }
    }

    #[test]
    fn insert_and_lookup() {
        let mut atlas = TextureAtlas::new(2, 2);
        let red = atlas.insert(solid("RED", 2, 0xFF_0000)).unwrap();
        let blue = atlas.insert(solid("BLUE", 2, 0x00_00FF)).unwrap();

        assert_eq!(red, 0);
        assert_eq!(blue, 1);
        assert_eq!(atlas.id("BLUE"), Some(blue));
        assert_eq!(atlas.id("NOPE"), None);
        assert_eq!(atlas.sample(0, 0), Some(0xFF_0000));
        assert_eq!(atlas.sample(3, 1), Some(0x00_00FF));
    }

    #[test]
    fn duplicate_and_mismatch_rejected() {
        let mut atlas = TextureAtlas::new(2, 2);
        atlas.insert(solid("WOOD", 2, 1)).unwrap();
        assert_eq!(
            atlas.insert(solid("WOOD", 2, 2)).unwrap_err(),
            TextureError::Duplicate("WOOD".into())
        );
        assert!(matches!(
            atlas.insert(solid("BIG", 4, 2)),
            Err(TextureError::SizeMismatch { w: 4, .. })
        ));
        assert_eq!(atlas.len(), 1);
    }

    #[test]
    fn bad_id_guard() {
        let atlas = TextureAtlas::procedural(8);
        assert_eq!(atlas.page(PageId::MAX).unwrap_err(), TextureError::BadId(PageId::MAX));
    }

    #[test]
    fn procedural_pages_are_named_and_sized() {
        let atlas = TextureAtlas::procedural(16);
        assert_eq!(atlas.len(), 3);
        assert_eq!(atlas.id("BRICK"), Some(0));
        assert_eq!(atlas.id("STONE"), Some(1));
        assert_eq!(atlas.id("MOSS"), Some(2));
        for id in 0..3 {
            let page = atlas.page(id).unwrap();
            assert_eq!((page.w, page.h), (16, 16));
        }
        // a clash with a built-in name is still rejected afterwards
        let mut atlas = atlas;
        assert!(atlas.insert(Texture::brick("MOSS", 16, 1, 2)).is_err());
    }

    #[test]
    fn tile_to_page() {
        assert_eq!(TextureAtlas::page_for_tile(0), None);
        assert_eq!(TextureAtlas::page_for_tile(1), Some(0));
        assert_eq!(TextureAtlas::page_for_tile(3), Some(2));
    }

    #[test]
    fn empty_atlas_samples_nothing() {
        assert_eq!(TextureAtlas::new(4, 4).sample(0, 0), None);
    }
}
