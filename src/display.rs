/// The low-resolution display size (64 x 32 pixels).
pub const LOW_RES_WIDTH_PIXELS: usize = 64;
pub const LOW_RES_HEIGHT_PIXELS: usize = 32;
/// The high-resolution display size (128 x 64 pixels).
pub const HIGH_RES_WIDTH_PIXELS: usize = 128;
pub const HIGH_RES_HEIGHT_PIXELS: usize = 64;
/// The number of bits in one storage word (one half-row).
const WORD_BITS: usize = 64;

/// A bit-packed monochrome frame buffer supporting two resolutions over shared storage.
///
/// Storage is two arrays of 64 words: `left` holds columns 0-63 of each high-resolution row and
/// `right` holds columns 64-127.  Within a word, column `x` is bit `63 - x`, so the most
/// significant bit is the leftmost pixel.  In low-resolution mode the 32 rows are simply
/// `left[0..32]`, meaning both modes see the same words and switching mode leaves the contents
/// alone.  (0, 0) is the top-left of the display.
///
/// The processor owns the live buffer; hosting applications receive copies through a
/// [StateSnapshot](crate::StateSnapshot).
#[derive(Clone, Debug, PartialEq)]
pub struct Display {
    left: [u64; HIGH_RES_HEIGHT_PIXELS],
    right: [u64; HIGH_RES_HEIGHT_PIXELS],
    high_resolution: bool,
}

impl Display {
    /// Constructor that returns a blank low-resolution [Display].
    pub(crate) fn new() -> Self {
        Display {
            left: [0x0; HIGH_RES_HEIGHT_PIXELS],
            right: [0x0; HIGH_RES_HEIGHT_PIXELS],
            high_resolution: false,
        }
    }

    /// Returns the width of the current mode in pixels
    pub fn width(&self) -> usize {
        match self.high_resolution {
            true => HIGH_RES_WIDTH_PIXELS,
            false => LOW_RES_WIDTH_PIXELS,
        }
    }

    /// Returns the height of the current mode in pixels
    pub fn height(&self) -> usize {
        match self.high_resolution {
            true => HIGH_RES_HEIGHT_PIXELS,
            false => LOW_RES_HEIGHT_PIXELS,
        }
    }

    pub fn is_high_resolution(&self) -> bool {
        self.high_resolution
    }

    /// Switches between modes.  The buffer is not cleared.
    pub(crate) fn set_high_resolution(&mut self, high_resolution: bool) {
        self.high_resolution = high_resolution;
    }

    /// Returns the raw storage words for row `y` as (columns 0-63, columns 64-127).  In
    /// low-resolution mode the second word is always 0.  Rows outside the current mode read as 0.
    pub fn row_words(&self, y: usize) -> (u64, u64) {
        if y >= self.height() {
            return (0x0, 0x0);
        }
        match self.high_resolution {
            true => (self.left[y], self.right[y]),
            false => (self.left[y], 0x0),
        }
    }

    /// Locates the storage word and bit mask for pixel (x, y), or `None` if off-screen.
    fn locate(&self, x: usize, y: usize) -> Option<(bool, u64)> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        match x < WORD_BITS {
            true => Some((false, 1 << (WORD_BITS - 1 - x))),
            false => Some((true, 1 << (WORD_BITS - 1 - (x - WORD_BITS)))),
        }
    }

    fn word_mut(&mut self, right_half: bool, y: usize) -> &mut u64 {
        match right_half {
            true => &mut self.right[y],
            false => &mut self.left[y],
        }
    }

    /// Returns true if the pixel at (x, y) is on.  Off-screen pixels read as off.
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        match self.locate(x, y) {
            Some((true, mask)) => self.right[y] & mask != 0,
            Some((false, mask)) => self.left[y] & mask != 0,
            None => false,
        }
    }

    /// Sets the pixel at (x, y).  Off-screen coordinates are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if let Some((right_half, mask)) = self.locate(x, y) {
            let word = self.word_mut(right_half, y);
            match on {
                true => *word |= mask,
                false => *word &= !mask,
            }
        }
    }

    /// Toggles the pixel at (x, y), returning true if it was on (i.e. it has been erased).
    pub fn xor_pixel(&mut self, x: usize, y: usize) -> bool {
        match self.locate(x, y) {
            Some((right_half, mask)) => {
                let word = self.word_mut(right_half, y);
                let erased: bool = *word & mask != 0;
                *word ^= mask;
                erased
            }
            None => false,
        }
    }

    /// XORs one sprite row onto the display.  `bits` holds the row right-aligned in its low
    /// `width` bits (8 or 16), most significant bit leftmost.  Pixels beyond the right edge are
    /// clipped, as is the whole row if `y` or `x` lies off-screen.  Returns true if any pixel
    /// was turned off.
    ///
    /// # Arguments
    ///
    /// * `x` - column of the leftmost sprite pixel
    /// * `y` - display row to draw into
    /// * `bits` - the sprite row
    /// * `width` - sprite width in pixels (1 to 16)
    pub(crate) fn draw_sprite_row(&mut self, x: usize, y: usize, bits: u16, width: usize) -> bool {
        if x >= self.width() || y >= self.height() || width == 0 {
            return false;
        }
        // Left-justify the row so that bit 63 is the sprite's first pixel
        let aligned: u64 = (bits as u64) << (WORD_BITS - width.min(16));
        let (first_half, second_half): (u64, u64) = if x < WORD_BITS {
            let spill: u64 = match self.high_resolution && x + width > WORD_BITS {
                true => aligned << (WORD_BITS - x),
                false => 0x0,
            };
            (aligned >> x, spill)
        } else {
            (0x0, aligned >> (x - WORD_BITS))
        };
        let collision: bool =
            (self.left[y] & first_half) != 0 || (self.right[y] & second_half) != 0;
        self.left[y] ^= first_half;
        self.right[y] ^= second_half;
        collision
    }

    /// Draws a sprite of `rows.len()` rows with the top-left corner at (x, y).  Rows falling
    /// below the bottom of the display are dropped.  Returns true if any row collided.
    pub(crate) fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u16], width: usize) -> bool {
        let mut collision: bool = false;
        for (i, row) in rows.iter().enumerate() {
            if y + i >= self.height() {
                break;
            }
            collision |= self.draw_sprite_row(x, y + i, *row, width);
        }
        collision
    }

    /// Turns every pixel off, in both halves.
    pub(crate) fn clear(&mut self) {
        self.left = [0x0; HIGH_RES_HEIGHT_PIXELS];
        self.right = [0x0; HIGH_RES_HEIGHT_PIXELS];
    }

    /// Scrolls the current mode's rows down by `n`, filling the top `n` rows with blanks.
    pub(crate) fn scroll_down(&mut self, n: usize) {
        let high_resolution: bool = self.high_resolution;
        for y in (0..self.height()).rev() {
            let (left, right): (u64, u64) = match y >= n {
                true => (self.left[y - n], self.right[y - n]),
                false => (0x0, 0x0),
            };
            self.left[y] = left;
            if high_resolution {
                self.right[y] = right;
            }
        }
    }

    /// Scrolls the current mode's rows right by 4 pixels.  In high resolution the low nibble of
    /// each left word carries into the top of the matching right word.
    pub(crate) fn scroll_right(&mut self) {
        for y in 0..self.height() {
            if self.high_resolution {
                self.right[y] = (self.right[y] >> 4) | (self.left[y] << 60);
            }
            self.left[y] >>= 4;
        }
    }

    /// Scrolls the current mode's rows left by 4 pixels.  In high resolution the top nibble of
    /// each right word carries into the bottom of the matching left word.
    pub(crate) fn scroll_left(&mut self) {
        for y in 0..self.height() {
            self.left[y] <<= 4;
            if self.high_resolution {
                self.left[y] |= self.right[y] >> 60;
                self.right[y] <<= 4;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_display_low_res() -> Display {
        let mut display: Display = Display::new();
        // Row 0:  0F55.. (00001111 01010101 then blanks)
        // Row 1:  F0AA.. (11110000 10101010 then blanks)
        display.left[0] = 0x0F55_0000_0000_0000;
        display.left[1] = 0xF0AA_0000_0000_0000;
        display
    }

    fn setup_test_display_high_res() -> Display {
        let mut display: Display = Display::new();
        display.set_high_resolution(true);
        display
    }

    fn setup_test_display_high_res_scroll() -> Display {
        let mut display: Display = setup_test_display_high_res();
        // Every row:  left ..00001001 | right 10010000..
        for y in 0..HIGH_RES_HEIGHT_PIXELS {
            display.left[y] = 0x0000_0000_0000_0009;
            display.right[y] = 0x9000_0000_0000_0000;
        }
        display
    }

    #[test]
    fn test_dimensions() {
        let mut display: Display = Display::new();
        let low = (display.width(), display.height());
        display.set_high_resolution(true);
        assert!(low == (64, 32) && display.width() == 128 && display.height() == 64);
    }

    #[test]
    fn test_get_pixel() {
        let display: Display = setup_test_display_low_res();
        assert!(
            !display.get_pixel(3, 0)
                && display.get_pixel(4, 0)
                && display.get_pixel(0, 1)
                && !display.get_pixel(4, 1)
                && !display.get_pixel(64, 0)
        );
    }

    #[test]
    fn test_set_pixel_right_half() {
        let mut display: Display = setup_test_display_high_res();
        display.set_pixel(64, 3, true);
        display.set_pixel(127, 3, true);
        assert_eq!(display.row_words(3), (0x0, 0x8000_0000_0000_0001));
    }

    #[test]
    fn test_set_pixel_off_screen_ignored() {
        let mut display: Display = Display::new();
        display.set_pixel(70, 40, true);
        assert_eq!(display, Display::new());
    }

    #[test]
    fn test_xor_pixel() {
        let mut display: Display = Display::new();
        let first: bool = display.xor_pixel(5, 5);
        let second: bool = display.xor_pixel(5, 5);
        assert!(!first && second && !display.get_pixel(5, 5));
    }

    #[test]
    fn test_draw_sprite_row_aligned() {
        let mut display: Display = Display::new();
        // 11111111 at (0, 0)
        let collision: bool = display.draw_sprite_row(0, 0, 0xFF, 8);
        assert!(!collision && display.row_words(0).0 == 0xFF00_0000_0000_0000);
    }

    #[test]
    fn test_draw_sprite_row_redraw_erases() {
        let mut display: Display = Display::new();
        display.draw_sprite_row(0, 0, 0xFF, 8);
        let collision: bool = display.draw_sprite_row(0, 0, 0xFF, 8);
        assert!(collision && display.row_words(0).0 == 0x0);
    }

    #[test]
    fn test_draw_sprite_row_unaligned() {
        let mut display: Display = setup_test_display_low_res();
        // 10110110 at x = 4 over 00001111 01010101:
        // 00001111 01010101
        // 00001011 0110....  XOR
        // 00000100 00110101
        let collision: bool = display.draw_sprite_row(4, 0, 0xB6, 8);
        assert!(collision && display.row_words(0).0 == 0x0435_0000_0000_0000);
    }

    #[test]
    fn test_draw_sprite_row_clipped_right_low_res() {
        let mut display: Display = Display::new();
        // Only the first four pixels fit on screen
        display.draw_sprite_row(60, 2, 0xFF, 8);
        assert!(display.row_words(2) == (0x0000_0000_0000_000F, 0x0) && display.right[2] == 0x0);
    }

    #[test]
    fn test_draw_sprite_row_spans_halves_high_res() {
        let mut display: Display = setup_test_display_high_res();
        display.draw_sprite_row(60, 2, 0xFF, 8);
        assert_eq!(
            display.row_words(2),
            (0x0000_0000_0000_000F, 0xF000_0000_0000_0000)
        );
    }

    #[test]
    fn test_draw_sprite_row_right_half_only() {
        let mut display: Display = setup_test_display_high_res();
        display.draw_sprite_row(68, 0, 0xABCD, 16);
        assert_eq!(display.row_words(0), (0x0, 0x0ABC_D000_0000_0000));
    }

    #[test]
    fn test_draw_sprite_row_clipped_right_high_res() {
        let mut display: Display = setup_test_display_high_res();
        display.draw_sprite_row(124, 0, 0xFFFF, 16);
        assert_eq!(display.row_words(0), (0x0, 0x0000_0000_0000_000F));
    }

    #[test]
    fn test_draw_sprite_row_off_screen() {
        let mut display: Display = Display::new();
        let collision: bool = display.draw_sprite_row(64, 0, 0xFF, 8);
        assert!(!collision && display == Display::new());
    }

    #[test]
    fn test_draw_sprite_clipped_bottom() {
        let mut display: Display = Display::new();
        let rows: [u16; 3] = [0x80, 0x80, 0x80];
        display.draw_sprite(0, LOW_RES_HEIGHT_PIXELS - 1, &rows, 8);
        // Only the last visible row is drawn, and nothing wraps to the top or leaks below
        assert!(
            display.get_pixel(0, LOW_RES_HEIGHT_PIXELS - 1)
                && !display.get_pixel(0, 0)
                && display.left[LOW_RES_HEIGHT_PIXELS] == 0x0
        );
    }

    #[test]
    fn test_draw_sprite_collision_any_row() {
        let mut display: Display = Display::new();
        display.set_pixel(1, 2, true);
        let rows: [u16; 3] = [0xC0, 0xC0, 0xC0];
        assert!(display.draw_sprite(0, 0, &rows, 8));
    }

    #[test]
    fn test_draw_sprite_collision_first_row_only() {
        let mut display: Display = Display::new();
        // Only the top row overlaps; the last row draws onto blank pixels
        display.set_pixel(0, 0, true);
        let rows: [u16; 2] = [0x80, 0x80];
        assert!(
            display.draw_sprite(0, 0, &rows, 8)
                && !display.get_pixel(0, 0)
                && display.get_pixel(0, 1)
        );
    }

    #[test]
    fn test_draw_sprite_no_pixels_unset() {
        let mut display: Display = setup_test_display_low_res();
        // 11110000 under 00001111 leaves nothing to erase
        let rows: [u16; 1] = [0xF0];
        assert!(!display.draw_sprite(0, 0, &rows, 8));
    }

    #[test]
    fn test_clear() {
        let mut display: Display = setup_test_display_high_res_scroll();
        display.set_high_resolution(false);
        display.clear();
        assert!(display.left.iter().chain(display.right.iter()).all(|w| *w == 0));
    }

    #[test]
    fn test_scroll_right_low_res() {
        let mut display: Display = Display::new();
        display.left[0] = 0xFF00_0000_0000_0000;
        display.scroll_right();
        assert_eq!(display.left[0], 0x0FF0_0000_0000_0000);
    }

    #[test]
    fn test_scroll_left_low_res() {
        let mut display: Display = Display::new();
        display.left[0] = 0x0FF0_0000_0000_0000;
        display.scroll_left();
        assert_eq!(display.left[0], 0xFF00_0000_0000_0000);
    }

    #[test]
    fn test_scroll_right_high_res_carries() {
        let mut display: Display = setup_test_display_high_res_scroll();
        display.scroll_right();
        // left ..00001001 | right 10010000..  ->  left ..00000000 | right 10011001 0000..
        assert!(display
            .left
            .iter()
            .zip(display.right.iter())
            .all(|(l, r)| *l == 0x0 && *r == 0x9900_0000_0000_0000));
    }

    #[test]
    fn test_scroll_left_high_res_carries() {
        let mut display: Display = setup_test_display_high_res_scroll();
        display.scroll_left();
        // left ..00001001 | right 10010000..  ->  left ..10011001 | right 0000..
        assert!(display
            .left
            .iter()
            .zip(display.right.iter())
            .all(|(l, r)| *l == 0x0000_0000_0000_0099 && *r == 0x0));
    }

    #[test]
    fn test_scroll_low_res_leaves_hidden_rows() {
        let mut display: Display = Display::new();
        display.left[40] = 0xFF;
        display.right[0] = 0xFF;
        display.scroll_left();
        display.scroll_down(3);
        assert!(display.left[40] == 0xFF && display.right[0] == 0xFF);
    }

    #[test]
    fn test_scroll_down() {
        let mut display: Display = setup_test_display_low_res();
        display.scroll_down(2);
        assert!(
            display.left[0] == 0x0
                && display.left[1] == 0x0
                && display.left[2] == 0x0F55_0000_0000_0000
                && display.left[3] == 0xF0AA_0000_0000_0000
        );
    }

    #[test]
    fn test_scroll_down_high_res_drops_bottom_rows() {
        let mut display: Display = setup_test_display_high_res();
        display.right[HIGH_RES_HEIGHT_PIXELS - 1] = 0x1;
        display.right[HIGH_RES_HEIGHT_PIXELS - 2] = 0x2;
        display.scroll_down(1);
        assert!(
            display.right[HIGH_RES_HEIGHT_PIXELS - 1] == 0x2
                && display.right.iter().filter(|w| **w != 0).count() == 1
        );
    }

    #[test]
    fn test_scroll_down_zero_is_noop() {
        let mut display: Display = setup_test_display_low_res();
        display.scroll_down(0);
        assert_eq!(display, setup_test_display_low_res());
    }

    #[test]
    fn test_resolution_toggle_preserves_buffer() {
        let mut display: Display = setup_test_display_low_res();
        display.set_high_resolution(true);
        let high_res_view: bool = display.get_pixel(4, 0);
        display.set_high_resolution(false);
        assert!(high_res_view && display == setup_test_display_low_res());
    }
}
