// This code is licensed under MIT license (see LICENSE for details)

//! Stores the machine's 64×32 monochrome display surface
//!
//! The only mutations a running program can make are [Screen::clear] and the
//! XOR [Screen::blit]; between cycles the host renders from a shared
//! reference.

use std::fmt::{Display, Formatter};

/// Width of the display in pixels
pub const WIDTH: usize = 64;
/// Height of the display in pixels
pub const HEIGHT: usize = 32;

/// A monochrome pixel grid, one `u64` per row with bit 63 as column 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Screen {
    rows: [u64; HEIGHT],
}

impl Screen {
    /// Constructs a new, blank Screen
    pub fn new() -> Self {
        Screen::default()
    }

    /// Clears every pixel to 0
    pub fn clear(&mut self) {
        self.rows = [0; HEIGHT];
    }

    /// Draws a sprite at (x, y) by XOR composition, one byte per row with
    /// the most significant bit leftmost. Returns true if any set pixel was
    /// toggled off.
    ///
    /// The origin wraps on both axes and each row wraps vertically, but
    /// columns that would pass the right edge are dropped, not wrapped:
    /// # Examples
    /// ```rust
    /// # use ocho::*;
    /// let mut screen = Screen::new();
    /// screen.blit(&[0xff], 60, 0);
    /// assert!(screen.pixel(63, 0));
    /// assert!(!screen.pixel(0, 0)); // bits 4..8 clipped, not wrapped
    /// ```
    pub fn blit(&mut self, sprite: &[u8], x: u8, y: u8) -> bool {
        let (x, y) = (x as usize % WIDTH, y as usize % HEIGHT);
        let mut collision = false;
        for (line, &byte) in sprite.iter().enumerate() {
            let row = &mut self.rows[(y + line) % HEIGHT];
            // Shift the byte into column position; a right shift clips the
            // columns that fall off the edge.
            let bits = if x <= WIDTH - 8 {
                (byte as u64) << (WIDTH - 8 - x)
            } else {
                (byte as u64) >> (x - (WIDTH - 8))
            };
            if *row & bits != 0 {
                collision = true;
            }
            *row ^= bits;
        }
        collision
    }

    /// Gets the state of one pixel. Coordinates wrap.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.rows[y % HEIGHT] & 1 << (WIDTH - 1 - x % WIDTH) != 0
    }

    /// Gets the raw bit rows, for renderers
    pub fn rows(&self) -> &[u64; HEIGHT] {
        &self.rows
    }

    /// True if no pixel is set
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }
}

impl Display for Screen {
    /// Renders the surface as text, two pixel rows per character row
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for pair in self.rows.chunks_exact(2) {
            for col in 0..WIDTH {
                let mask = 1 << (WIDTH - 1 - col);
                write!(
                    f,
                    "{}",
                    match (pair[0] & mask != 0, pair[1] & mask != 0) {
                        (true, true) => '█',
                        (true, false) => '▀',
                        (false, true) => '▄',
                        (false, false) => ' ',
                    }
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_sets_pixels() {
        let mut screen = Screen::new();
        assert!(!screen.blit(&[0b1010_0001], 0, 0));
        assert!(screen.pixel(0, 0));
        assert!(!screen.pixel(1, 0));
        assert!(screen.pixel(2, 0));
        assert!(screen.pixel(7, 0));
    }

    #[test]
    fn double_blit_collides_and_clears() {
        let mut screen = Screen::new();
        assert!(!screen.blit(&[0xff], 0, 0));
        assert!(screen.blit(&[0xff], 0, 0));
        assert!(screen.is_blank());
    }

    #[test]
    fn partial_overlap_collides() {
        let mut screen = Screen::new();
        screen.blit(&[0b1000_0000], 0, 0);
        assert!(screen.blit(&[0b1100_0000], 0, 0));
        // the overlapping pixel toggled off, the other on
        assert!(!screen.pixel(0, 0));
        assert!(screen.pixel(1, 0));
    }

    #[test]
    fn right_edge_clips() {
        let mut screen = Screen::new();
        screen.blit(&[0xff], 60, 0);
        for col in 60..64 {
            assert!(screen.pixel(col, 0), "column {col} should be set");
        }
        for col in 0..4 {
            assert!(!screen.pixel(col, 0), "column {col} should be clipped");
        }
    }

    #[test]
    fn origin_wraps_both_axes() {
        let mut screen = Screen::new();
        screen.blit(&[0x80], 64, 32);
        assert!(screen.pixel(0, 0));
    }

    #[test]
    fn rows_wrap_vertically() {
        let mut screen = Screen::new();
        screen.blit(&[0x80, 0x80], 0, 31);
        assert!(screen.pixel(0, 31));
        assert!(screen.pixel(0, 0));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut screen = Screen::new();
        screen.blit(&[0xff, 0xff], 10, 10);
        screen.clear();
        let once = screen;
        screen.clear();
        assert_eq!(once, screen);
        assert!(screen.is_blank());
    }
}
