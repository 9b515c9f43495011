//! Display driver capability
//!
//! Defines the interface a panel driver exposes to the session. The driver
//! owns the frame buffer and the text cursor; the session only sequences
//! calls.

use crate::grid::{CELL_HEIGHT, CELL_WIDTH, MAX_COLS, MAX_ROWS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Panel did not acknowledge at the configured address
    NotAcknowledged,
    /// Any other bus failure
    Bus,
    /// Geometry is not supported by this driver
    InvalidGeometry,
    /// Drawing was attempted before `initialize` succeeded
    NotInitialized,
    /// Text style is not supported by this driver
    UnsupportedStyle,
}

/// Panel size and bus address
///
/// These are configuration fields on the driver rather than constants, so a
/// different panel only needs a different `PanelGeometry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelGeometry {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// 7-bit I2C address
    pub address: u8,
}

impl PanelGeometry {
    /// 128x64 SSD1306 at the usual 0x3C address
    pub const SSD1306_128X64: Self = Self::new(128, 64, 0x3C);

    /// Create a geometry
    pub const fn new(width: u16, height: u16, address: u8) -> Self {
        Self {
            width,
            height,
            address,
        }
    }

    /// Text columns that fit across the panel
    pub const fn cols(&self) -> u8 {
        let cols = self.width / CELL_WIDTH;
        if cols > MAX_COLS as u16 {
            MAX_COLS as u8
        } else {
            cols as u8
        }
    }

    /// Text rows that fit down the panel
    pub const fn rows(&self) -> u8 {
        let rows = self.height / CELL_HEIGHT;
        if rows > MAX_ROWS as u16 {
            MAX_ROWS as u8
        } else {
            rows as u8
        }
    }

    /// Number of 8-pixel pages (one byte tall each)
    pub const fn pages(&self) -> u16 {
        self.height / 8
    }

    /// Check the geometry is usable for text output
    ///
    /// Height must be a whole number of pages, the address must fit in
    /// 7 bits, and the text grid must fit in a `TextGrid`.
    pub const fn is_valid(&self) -> bool {
        self.width >= CELL_WIDTH
            && self.height >= CELL_HEIGHT
            && self.height % 8 == 0
            && self.address <= 0x7F
            && self.width / CELL_WIDTH <= MAX_COLS as u16
            && self.height / CELL_HEIGHT <= MAX_ROWS as u16
    }

    /// Check an SSD1306 controller can drive this geometry
    ///
    /// The controller has 128 segment columns and is wired for 32 or 64
    /// COM rows.
    pub const fn is_ssd1306_supported(&self) -> bool {
        self.is_valid() && self.width <= 128 && (self.height == 32 || self.height == 64)
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::SSD1306_128X64
    }
}

/// Text rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    /// Pixel scale (1 = 1:1)
    pub scale: u8,
    /// Dark text on a lit background
    pub inverted: bool,
}

impl TextStyle {
    /// Single-scale, lit text on a dark background
    pub const NORMAL: Self = Self {
        scale: 1,
        inverted: false,
    };
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Display driver capability
///
/// Implemented by panel drivers (e.g. SSD1306 over I2C) and by the
/// headless driver used in tests. Drawing calls only touch the frame
/// buffer; nothing reaches the panel until `present`.
pub trait DisplayDriver {
    /// Configured panel geometry and address
    fn geometry(&self) -> PanelGeometry;

    /// Power up the panel at the configured geometry and address
    fn initialize(&mut self) -> Result<(), DriverError>;

    /// Blank the frame buffer. The cursor is not moved.
    fn clear_frame(&mut self) -> Result<(), DriverError>;

    /// Move the text cursor
    ///
    /// - `col`: Column in characters (0-based)
    /// - `row`: Row in characters (0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DriverError>;

    /// Select the style used by subsequent `write` calls
    ///
    /// Drivers with a single fixed style accept and ignore this.
    fn set_text_style(&mut self, style: TextStyle) -> Result<(), DriverError> {
        let _ = style;
        Ok(())
    }

    /// Draw text at the cursor, advancing it with the driver's wrap rules
    fn write(&mut self, text: &str) -> Result<(), DriverError>;

    /// Transfer the frame buffer to the panel
    ///
    /// Blocks until the bus transfer completes.
    fn present(&mut self) -> Result<(), DriverError>;
}
