//! 1-bit frame buffer
//!
//! Pixels are stored the way SSD1306-class controllers expect them: one byte
//! covers eight vertical pixels of a page, least significant bit on top.
//!
//! Text uses the ISO-8859-1 5x8 font: characters outside Latin-1 (CP437 box
//! drawing included) render as the font's replacement glyph.

use embedded_graphics::mono_font::iso_8859_1::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};

use homelog_display::{TextStyle, CELL_HEIGHT, CELL_WIDTH};

/// Widest supported panel
pub const MAX_WIDTH: usize = 128;

/// Tallest supported panel, in 8-pixel pages
pub const MAX_PAGES: usize = 8;

/// Monochrome frame buffer, organized as pages
pub struct FrameBuffer {
    pages: [[u8; MAX_WIDTH]; MAX_PAGES],
    width: u16,
    height: u16,
}

impl FrameBuffer {
    /// Create a blank buffer. Dimensions are clamped to 128x64.
    pub const fn new(width: u16, height: u16) -> Self {
        let width = if width as usize > MAX_WIDTH {
            MAX_WIDTH as u16
        } else {
            width
        };
        let height = if height as usize > MAX_PAGES * 8 {
            (MAX_PAGES * 8) as u16
        } else {
            height
        };
        Self {
            pages: [[0; MAX_WIDTH]; MAX_PAGES],
            width,
            height,
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Set one pixel. Points outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let byte = &mut self.pages[(y / 8) as usize][x as usize];
        let mask = 1 << (y % 8);
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Read one pixel. Points outside the buffer read as off.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.pages[(y / 8) as usize][x as usize] & (1 << (y % 8)) != 0
    }

    /// Bytes of one page, `width` long
    pub fn page(&self, page: usize) -> &[u8] {
        &self.pages[page][..self.width as usize]
    }

    /// Number of pages in use
    pub const fn page_count(&self) -> usize {
        (self.height as usize + 7) / 8
    }

    /// Draw one character into a text cell
    ///
    /// The whole 6x8 cell is painted, so a glyph replaces whatever was there.
    pub fn draw_glyph(&mut self, col: u8, row: u8, ch: char, style: TextStyle) {
        let (fg, bg) = if style.inverted {
            (BinaryColor::Off, BinaryColor::On)
        } else {
            (BinaryColor::On, BinaryColor::Off)
        };

        let origin = Point::new(
            i32::from(col) * i32::from(CELL_WIDTH),
            i32::from(row) * i32::from(CELL_HEIGHT),
        );
        let cell = Rectangle::new(
            origin,
            Size::new(u32::from(CELL_WIDTH), u32::from(CELL_HEIGHT)),
        );
        let _ = self.fill_solid(&cell, bg);

        let text_style = MonoTextStyleBuilder::new()
            .font(&FONT_5X8)
            .text_color(fg)
            .build();
        let mut utf8 = [0u8; 4];
        let _ = Text::with_baseline(ch.encode_utf8(&mut utf8), origin, text_style, Baseline::Top)
            .draw(self);
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_lit(frame: &FrameBuffer, col: i32, row: i32) -> usize {
        let mut lit = 0;
        for y in row * 8..row * 8 + 8 {
            for x in col * 6..col * 6 + 6 {
                if frame.pixel(x, y) {
                    lit += 1;
                }
            }
        }
        lit
    }

    #[test]
    fn test_pixel_packing() {
        let mut frame = FrameBuffer::new(128, 64);
        frame.set_pixel(3, 0, true);
        frame.set_pixel(3, 9, true);

        assert_eq!(frame.page(0)[3], 0b0000_0001);
        assert_eq!(frame.page(1)[3], 0b0000_0010);
        assert!(frame.pixel(3, 9));

        frame.set_pixel(3, 9, false);
        assert_eq!(frame.page(1)[3], 0);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut frame = FrameBuffer::new(128, 32);
        frame.set_pixel(-1, 0, true);
        frame.set_pixel(128, 0, true);
        frame.set_pixel(0, 32, true);

        assert_eq!(frame.page_count(), 4);
        assert!((0..4).all(|p| frame.page(p).iter().all(|&b| b == 0)));
        assert!(!frame.pixel(0, 40));
    }

    #[test]
    fn test_glyph_stays_in_cell() {
        let mut frame = FrameBuffer::new(128, 64);
        frame.draw_glyph(2, 1, 'H', TextStyle::NORMAL);

        assert!(cell_lit(&frame, 2, 1) > 0);
        assert_eq!(cell_lit(&frame, 1, 1), 0);
        assert_eq!(cell_lit(&frame, 3, 1), 0);
        assert_eq!(cell_lit(&frame, 2, 0), 0);
        assert_eq!(cell_lit(&frame, 2, 2), 0);
    }

    #[test]
    fn test_space_blanks_cell() {
        let mut frame = FrameBuffer::new(128, 64);
        frame.draw_glyph(0, 0, 'W', TextStyle::NORMAL);
        frame.draw_glyph(0, 0, ' ', TextStyle::NORMAL);
        assert_eq!(cell_lit(&frame, 0, 0), 0);
    }

    #[test]
    fn test_inverted_glyph_lights_background() {
        let mut frame = FrameBuffer::new(128, 64);
        let inverted = TextStyle {
            inverted: true,
            ..TextStyle::NORMAL
        };
        frame.draw_glyph(0, 0, ' ', inverted);
        assert_eq!(cell_lit(&frame, 0, 0), 48);
    }

    #[test]
    fn test_non_latin1_draws_replacement() {
        let mut boxed = FrameBuffer::new(128, 64);
        boxed.draw_glyph(0, 0, '─', TextStyle::NORMAL);
        let mut question = FrameBuffer::new(128, 64);
        question.draw_glyph(0, 0, '?', TextStyle::NORMAL);

        assert!(cell_lit(&boxed, 0, 0) > 0);
        assert_eq!(boxed.page(0)[..6], question.page(0)[..6]);

        let mut degree = FrameBuffer::new(128, 64);
        degree.draw_glyph(0, 0, '°', TextStyle::NORMAL);
        assert_ne!(degree.page(0)[..6], question.page(0)[..6]);
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new(128, 64);
        frame.draw_glyph(0, 0, 'A', TextStyle::NORMAL);
        frame.clear();
        assert_eq!(cell_lit(&frame, 0, 0), 0);
    }
}
