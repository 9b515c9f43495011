//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 (or 128x32) SSD1306-based OLED displays via I2C.
//! Text is laid out on 6x8 cells (21 chars x 8 rows on 128x64).
//! The charge pump is generated internally from 3.3V; no reset line is used.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

use homelog_display::{DisplayDriver, DriverError, PanelGeometry, TextCursor, TextStyle};

use super::framebuffer::{FrameBuffer, MAX_WIDTH};

/// Control byte: following byte is a command
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte: following bytes are display data
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    geometry: PanelGeometry,
    /// Frame buffer (1 bit per pixel, organized as pages)
    frame: FrameBuffer,
    cursor: TextCursor,
    style: TextStyle,
    initialized: bool,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a new SSD1306 driver
    ///
    /// Nothing is sent on the bus until `initialize`.
    pub fn new(i2c: I2C, geometry: PanelGeometry) -> Self {
        Self {
            i2c,
            geometry,
            frame: FrameBuffer::new(geometry.width, geometry.height),
            cursor: TextCursor::for_geometry(&geometry),
            style: TextStyle::NORMAL,
            initialized: false,
        }
    }

    /// Frame buffer as it will be sent on the next `present`
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Current text cursor
    pub fn cursor(&self) -> TextCursor {
        self.cursor
    }

    /// Give back the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DriverError> {
        self.commands(&[cmd::SET_CONTRAST, contrast])
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DriverError> {
        if on {
            self.command(cmd::DISPLAY_ON)
        } else {
            self.command(cmd::DISPLAY_OFF)
        }
    }

    /// Invert the whole panel in hardware
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DriverError> {
        if inverted {
            self.command(cmd::SET_INVERSE)
        } else {
            self.command(cmd::SET_NORMAL)
        }
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), DriverError> {
        self.i2c
            .write(self.geometry.address, &[CONTROL_COMMAND, cmd])
            .map_err(bus_error)
    }

    fn commands(&mut self, cmds: &[u8]) -> Result<(), DriverError> {
        for &c in cmds {
            self.command(c)?;
        }
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), DriverError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DriverError::NotInitialized)
        }
    }
}

impl<I2C: I2c> DisplayDriver for Ssd1306<I2C> {
    fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    fn initialize(&mut self) -> Result<(), DriverError> {
        if !self.geometry.is_ssd1306_supported() {
            return Err(DriverError::InvalidGeometry);
        }

        let mux_ratio = (self.geometry.height - 1) as u8;
        let (com_pins, contrast) = if self.geometry.height == 64 {
            (0x12, 0xCF)
        } else {
            (0x02, 0x8F)
        };

        // Initialization sequence for SSD1306 with internal charge pump
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            mux_ratio,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x00,                  // Horizontal addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            com_pins,
            cmd::SET_CONTRAST,
            contrast,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::DISPLAY_ALL_ON_RESUME,
            cmd::SET_NORMAL,
            cmd::DEACTIVATE_SCROLL,
            cmd::DISPLAY_ON,
        ];
        self.commands(init_cmds)?;

        self.frame = FrameBuffer::new(self.geometry.width, self.geometry.height);
        self.cursor = TextCursor::for_geometry(&self.geometry);
        self.initialized = true;
        Ok(())
    }

    fn clear_frame(&mut self) -> Result<(), DriverError> {
        self.ensure_initialized()?;
        self.frame.clear();
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DriverError> {
        self.ensure_initialized()?;
        self.cursor.set_position(col, row);
        Ok(())
    }

    fn set_text_style(&mut self, style: TextStyle) -> Result<(), DriverError> {
        self.ensure_initialized()?;
        if style.scale != 1 {
            return Err(DriverError::UnsupportedStyle);
        }
        self.style = style;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<(), DriverError> {
        self.ensure_initialized()?;
        for ch in text.chars() {
            if let Some((col, row)) = self.cursor.place(ch) {
                self.frame.draw_glyph(col, row, ch, self.style);
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), DriverError> {
        self.ensure_initialized()?;

        let width = self.geometry.width as usize;
        let pages = self.frame.page_count();
        self.commands(&[
            cmd::SET_COLUMN_ADDR,
            0,
            (width - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (pages - 1) as u8,
        ])?;

        for page in 0..pages {
            // Send page data
            let mut data = [0u8; MAX_WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..=width].copy_from_slice(self.frame.page(page));
            self.i2c
                .write(self.geometry.address, &data[..=width])
                .map_err(bus_error)?;
        }

        Ok(())
    }
}

/// A missing panel shows up as an address NACK
fn bus_error<E: embedded_hal::i2c::Error>(e: E) -> DriverError {
    match e.kind() {
        ErrorKind::NoAcknowledge(_) => DriverError::NotAcknowledged,
        _ => DriverError::Bus,
    }
}
