//! Headless display driver
//!
//! Keeps text in memory instead of driving a panel. Used by the unit tests
//! and by anything that wants to run the session without hardware.

use crate::backend::{DisplayDriver, DriverError, PanelGeometry, TextStyle};
use crate::grid::TextGrid;

/// In-memory `DisplayDriver`
///
/// `buffer` is the frame being drawn; `screen` is what was last presented.
/// A `present` copies the buffer to the screen, the same way a panel
/// driver streams its frame buffer over the bus.
#[derive(Debug, Clone)]
pub struct HeadlessDriver {
    geometry: PanelGeometry,
    buffer: TextGrid,
    screen: TextGrid,
    style: TextStyle,
    initialized: bool,
    /// `initialize` always fails (panel absent)
    absent: bool,
    /// Drawing and present calls fail with `Bus`
    bus_fault: bool,
    init_count: u32,
    present_count: u32,
}

impl HeadlessDriver {
    /// Create a driver for a panel that is present
    pub fn new(geometry: PanelGeometry) -> Self {
        Self {
            geometry,
            buffer: TextGrid::for_geometry(&geometry),
            screen: TextGrid::for_geometry(&geometry),
            style: TextStyle::NORMAL,
            initialized: false,
            absent: false,
            bus_fault: false,
            init_count: 0,
            present_count: 0,
        }
    }

    /// Create a driver whose panel never acknowledges
    pub fn failing(geometry: PanelGeometry) -> Self {
        Self {
            absent: true,
            ..Self::new(geometry)
        }
    }

    /// Make subsequent drawing and present calls fail with `Bus`
    pub fn set_bus_fault(&mut self, fault: bool) {
        self.bus_fault = fault;
    }

    /// Frame currently being drawn
    pub fn buffer(&self) -> &TextGrid {
        &self.buffer
    }

    /// Frame last presented
    pub fn screen(&self) -> &TextGrid {
        &self.screen
    }

    /// Style last selected
    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Whether `initialize` has succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of `initialize` calls, successful or not
    pub fn init_count(&self) -> u32 {
        self.init_count
    }

    /// Number of successful `present` calls
    pub fn present_count(&self) -> u32 {
        self.present_count
    }

    fn ready(&self) -> Result<(), DriverError> {
        if !self.initialized {
            Err(DriverError::NotInitialized)
        } else if self.bus_fault {
            Err(DriverError::Bus)
        } else {
            Ok(())
        }
    }
}

impl DisplayDriver for HeadlessDriver {
    fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    fn initialize(&mut self) -> Result<(), DriverError> {
        self.init_count += 1;
        if self.absent {
            return Err(DriverError::NotAcknowledged);
        }
        if !self.geometry.is_valid() {
            return Err(DriverError::InvalidGeometry);
        }
        self.buffer = TextGrid::for_geometry(&self.geometry);
        self.screen = TextGrid::for_geometry(&self.geometry);
        self.initialized = true;
        Ok(())
    }

    fn clear_frame(&mut self) -> Result<(), DriverError> {
        self.ready()?;
        self.buffer.blank();
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DriverError> {
        self.ready()?;
        self.buffer.set_cursor(col, row);
        Ok(())
    }

    fn set_text_style(&mut self, style: TextStyle) -> Result<(), DriverError> {
        self.ready()?;
        self.style = style;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<(), DriverError> {
        self.ready()?;
        self.buffer.write_str(text);
        Ok(())
    }

    fn present(&mut self) -> Result<(), DriverError> {
        self.ready()?;
        self.screen = self.buffer.clone();
        self.present_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_requires_initialize() {
        let mut driver = HeadlessDriver::new(PanelGeometry::SSD1306_128X64);
        assert_eq!(driver.write("x"), Err(DriverError::NotInitialized));
        assert_eq!(driver.present(), Err(DriverError::NotInitialized));

        driver.initialize().unwrap();
        assert!(driver.write("x").is_ok());
    }

    #[test]
    fn test_failing_panel() {
        let mut driver = HeadlessDriver::failing(PanelGeometry::SSD1306_128X64);
        assert_eq!(driver.initialize(), Err(DriverError::NotAcknowledged));
        assert!(!driver.is_initialized());
        assert_eq!(driver.init_count(), 1);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let mut driver = HeadlessDriver::new(PanelGeometry::new(128, 60, 0x3C));
        assert_eq!(driver.initialize(), Err(DriverError::InvalidGeometry));
    }

    #[test]
    fn test_present_copies_buffer() {
        let mut driver = HeadlessDriver::new(PanelGeometry::SSD1306_128X64);
        driver.initialize().unwrap();

        driver.write("Hello").unwrap();
        assert!(driver.screen().is_blank());

        driver.present().unwrap();
        assert_eq!(driver.screen().line(0).as_str(), "Hello");
        assert_eq!(driver.present_count(), 1);
    }

    #[test]
    fn test_bus_fault() {
        let mut driver = HeadlessDriver::new(PanelGeometry::SSD1306_128X64);
        driver.initialize().unwrap();
        driver.set_bus_fault(true);

        assert_eq!(driver.write("x"), Err(DriverError::Bus));
        assert_eq!(driver.present(), Err(DriverError::Bus));
        assert_eq!(driver.present_count(), 0);
    }
}
