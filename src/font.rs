/// Bytes per glyph of the small (4x5) font.
const SMALL_GLYPH_SIZE: usize = 5;
/// The small font: hex digits 0-F, each one byte wide and five rows tall.
const SMALL_FONT_DATA: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
/// Bytes per glyph of the large (8x10) font.
const LARGE_GLYPH_SIZE: usize = 10;
/// The large font: decimal digits 0-9, each one byte wide and ten rows tall.
const LARGE_FONT_DATA: [u8; 100] = [
    0x3C, 0x7E, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0x7E, 0x3C, // 0
    0x18, 0x38, 0x58, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, // 1
    0x3E, 0x7F, 0xC3, 0x06, 0x0C, 0x18, 0x30, 0x60, 0xFF, 0xFF, // 2
    0x3C, 0x7E, 0xC3, 0x03, 0x0E, 0x0E, 0x03, 0xC3, 0x7E, 0x3C, // 3
    0x06, 0x0E, 0x1E, 0x36, 0x66, 0xC6, 0xFF, 0xFF, 0x06, 0x06, // 4
    0xFF, 0xFF, 0xC0, 0xC0, 0xFC, 0xFE, 0x03, 0xC3, 0x7E, 0x3C, // 5
    0x3E, 0x7C, 0xC0, 0xC0, 0xFC, 0xFE, 0xC3, 0xC3, 0x7E, 0x3C, // 6
    0xFF, 0xFF, 0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x60, 0x60, // 7
    0x3C, 0x7E, 0xC3, 0xC3, 0x7E, 0x7E, 0xC3, 0xC3, 0x7E, 0x3C, // 8
    0x3C, 0x7E, 0xC3, 0xC3, 0x7F, 0x3F, 0x03, 0x03, 0x3E, 0x7C, // 9
];

/// A built-in font, prior to being written into memory.
pub(crate) struct Font {
    glyph_size: usize,
    font_data: &'static [u8],
}

impl Font {
    /// The small font used by FX29 (16 hex glyphs).
    pub(crate) fn small() -> Self {
        Font {
            glyph_size: SMALL_GLYPH_SIZE,
            font_data: &SMALL_FONT_DATA,
        }
    }

    /// The large font used by FX30 (10 decimal digits).
    pub(crate) fn large() -> Self {
        Font {
            glyph_size: LARGE_GLYPH_SIZE,
            font_data: &LARGE_FONT_DATA,
        }
    }

    pub(crate) fn font_data(&self) -> &[u8] {
        self.font_data
    }

    pub(crate) fn font_data_size(&self) -> usize {
        self.font_data.len()
    }

    /// Returns the number of glyphs in the font.
    pub(crate) fn glyph_count(&self) -> usize {
        self.font_data.len() / self.glyph_size
    }

    /// Returns the memory address of the given glyph, for a font loaded at `font_start`.
    /// The caller is responsible for checking `glyph < glyph_count()`.
    pub(crate) fn glyph_address(&self, font_start: usize, glyph: usize) -> usize {
        font_start + glyph * self.glyph_size
    }
}
