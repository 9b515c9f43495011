//! Startup banner
//!
//! Four lines: a blank spacer, the program name, `Version: <version>`, and
//! the build string.

use crate::backend::{DisplayDriver, DriverError};

/// Program identification shown at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Banner<'a> {
    pub program: &'a str,
    pub version: &'a str,
    pub build: &'a str,
}

impl<'a> Banner<'a> {
    /// Number of text lines the banner occupies
    pub const LINES: u8 = 4;

    /// Prefix of the version line
    pub const VERSION_PREFIX: &'static str = "Version: ";

    /// Create a banner
    pub const fn new(program: &'a str, version: &'a str, build: &'a str) -> Self {
        Self {
            program,
            version,
            build,
        }
    }

    /// Write the banner at the driver's cursor
    ///
    /// Does not clear or present; the caller controls both.
    pub fn render<D: DisplayDriver + ?Sized>(&self, driver: &mut D) -> Result<(), DriverError> {
        driver.write("\n")?;
        driver.write(self.program)?;
        driver.write("\n")?;
        driver.write(Self::VERSION_PREFIX)?;
        driver.write(self.version)?;
        driver.write("\n")?;
        driver.write(self.build)?;
        driver.write("\n")
    }
}
