//! Software font: glyph cache, run-length spans and advance widths
//!
//! Glyphs are 8x16 bitmaps, one byte per row with the leftmost pixel in the
//! most significant bit. They are expanded once into boolean matrices and
//! drawn as horizontal spans: every run of set pixels in a row becomes one
//! filled rectangle, so a glyph costs at most four rectangles per row
//! instead of one per pixel.

/// Glyph width in pixels
pub const GLYPH_WIDTH: usize = 8;
/// Glyph height in pixels
pub const GLYPH_HEIGHT: usize = 16;
/// Each glyph pixel is drawn as a square of this size
pub const GLYPH_SCALE: u16 = 2;

/// Source of glyph bitmaps, consulted once while the cache is built
pub trait FontData {
    fn bitmap(&self, ch: u8) -> Option<[u8; GLYPH_HEIGHT]>;
}

/// Sparse font table of (character, bitmap) pairs
#[derive(Debug, Clone, Copy)]
pub struct GlyphTable<'a> {
    entries: &'a [(u8, [u8; GLYPH_HEIGHT])],
}

impl<'a> GlyphTable<'a> {
    pub const fn new(entries: &'a [(u8, [u8; GLYPH_HEIGHT])]) -> Self {
        Self { entries }
    }
}

impl FontData for GlyphTable<'_> {
    fn bitmap(&self, ch: u8) -> Option<[u8; GLYPH_HEIGHT]> {
        self.entries
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, bitmap)| *bitmap)
    }
}

/// Inclusive run of set pixels within one glyph row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u8,
    pub end: u8,
}

/// Iterator over the maximal runs of set pixels in a row
pub struct Spans<'a> {
    row: &'a [bool; GLYPH_WIDTH],
    col: usize,
}

impl Iterator for Spans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        while self.col < GLYPH_WIDTH && !self.row[self.col] {
            self.col += 1;
        }
        if self.col == GLYPH_WIDTH {
            return None;
        }
        let start = self.col;
        while self.col < GLYPH_WIDTH && self.row[self.col] {
            self.col += 1;
        }
        Some(Span {
            start: start as u8,
            end: (self.col - 1) as u8,
        })
    }
}

/// Runs of set pixels in `row`, left to right
pub fn spans(row: &[bool; GLYPH_WIDTH]) -> Spans<'_> {
    Spans { row, col: 0 }
}

/// Expanded 8x16 pixel matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pixels: [[bool; GLYPH_WIDTH]; GLYPH_HEIGHT],
}

impl Glyph {
    pub fn from_bitmap(bitmap: &[u8; GLYPH_HEIGHT]) -> Self {
        let mut pixels = [[false; GLYPH_WIDTH]; GLYPH_HEIGHT];
        for (row, bits) in pixels.iter_mut().zip(bitmap) {
            for (col, pixel) in row.iter_mut().enumerate() {
                *pixel = bits & (0x80 >> col) != 0;
            }
        }
        Self { pixels }
    }

    pub fn pixel(&self, row: usize, col: usize) -> bool {
        self.pixels[row][col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; GLYPH_WIDTH]> {
        self.pixels.iter()
    }
}

/// Glyphs for every byte value the font defines
pub struct GlyphCache {
    glyphs: [Option<Glyph>; 256],
}

impl GlyphCache {
    pub const fn empty() -> Self {
        Self { glyphs: [None; 256] }
    }

    pub fn build<F: FontData + ?Sized>(font: &F) -> Self {
        let mut cache = Self::empty();
        for (ch, slot) in (0..=u8::MAX).zip(cache.glyphs.iter_mut()) {
            *slot = font.bitmap(ch).map(|bitmap| Glyph::from_bitmap(&bitmap));
        }
        cache
    }

    pub fn get(&self, ch: u8) -> Option<&Glyph> {
        self.glyphs[ch as usize].as_ref()
    }

    pub fn len(&self) -> usize {
        self.glyphs.iter().filter(|g| g.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-character horizontal advance in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTable {
    widths: [u8; 256],
}

impl AdvanceTable {
    pub const fn new(default: u8, exceptions: &[(u8, u8)]) -> Self {
        let mut widths = [default; 256];
        let mut i = 0;
        while i < exceptions.len() {
            widths[exceptions[i].0 as usize] = exceptions[i].1;
            i += 1;
        }
        Self { widths }
    }

    pub const fn advance(&self, ch: u8) -> u16 {
        self.widths[ch as usize] as u16
    }
}

/// Advance widths tuned for the dashboard's Comic Sans bitmaps
pub const COMIC_SANS_ADVANCE: AdvanceTable = AdvanceTable::new(
    16,
    &[
        (b' ', 12),
        (b'l', 10),
        (b'i', 13),
        (b'o', 15),
        (b'r', 15),
        (b'g', 15),
        (b'a', 17),
        (b'M', 18),
        (b'G', 18),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TEST_FONT;

    fn collect(row: [u8; GLYPH_WIDTH]) -> Vec<(u8, u8)> {
        let row = row.map(|p| p != 0);
        spans(&row).map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn test_span_compression() {
        assert_eq!(collect([1, 1, 0, 1, 1, 1, 0, 0]), vec![(0, 1), (3, 5)]);
    }

    #[test]
    fn test_span_edges() {
        assert!(collect([0; 8]).is_empty());
        assert_eq!(collect([1; 8]), vec![(0, 7)]);
        assert_eq!(collect([1, 0, 1, 0, 1, 0, 1, 0]).len(), 4);
        assert_eq!(collect([0, 0, 0, 0, 0, 0, 0, 1]), vec![(7, 7)]);
    }

    #[test]
    fn test_glyph_msb_is_leftmost() {
        let mut bitmap = [0u8; GLYPH_HEIGHT];
        bitmap[3] = 0b1000_0001;
        let glyph = Glyph::from_bitmap(&bitmap);

        assert!(glyph.pixel(3, 0));
        assert!(glyph.pixel(3, 7));
        assert!(!glyph.pixel(3, 1));
        assert!(!glyph.pixel(0, 0));
    }

    #[test]
    fn test_cache_holds_only_defined_glyphs() {
        let cache = GlyphCache::build(&TEST_FONT);

        assert!(cache.get(b'T').is_some());
        assert!(cache.get(0xFF).is_none());
        assert_eq!(cache.len(), 3);
        assert!(GlyphCache::empty().is_empty());
    }

    #[test]
    fn test_advance_exceptions() {
        assert_eq!(COMIC_SANS_ADVANCE.advance(b'l'), 10);
        assert_eq!(COMIC_SANS_ADVANCE.advance(b'M'), 18);
        assert_eq!(COMIC_SANS_ADVANCE.advance(b'x'), 16);
        assert_eq!(COMIC_SANS_ADVANCE.advance(b' '), 12);
    }
}
