//! Display session
//!
//! Ordered text output over a `DisplayDriver`. Every operation presents
//! before returning, so what was printed is on the panel when the call ends.
//!
//! A panel that fails to initialize leaves the session `Degraded`. In that
//! state `print`, `clear` and `banner` do nothing, so the rest of the
//! firmware keeps running without a display.

use crate::backend::{DisplayDriver, DriverError, TextStyle};
use crate::banner::Banner;

/// First line shown once the panel is up
pub const WELCOME_LINE: &str = "OLED screen active...";

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// `begin` has not been called
    Uninitialized,
    /// Panel initialized; output reaches the driver
    Ready,
    /// Panel failed to initialize; output is dropped
    Degraded,
}

/// Text output session over a borrowed driver
///
/// The driver lives for the whole program; the session only borrows it.
/// The cursor is the driver's, not duplicated here.
pub struct DisplaySession<'d, D: DisplayDriver> {
    driver: &'d mut D,
    state: SessionState,
}

impl<'d, D: DisplayDriver> DisplaySession<'d, D> {
    /// Create a session. Nothing is sent to the driver until `begin`.
    pub fn new(driver: &'d mut D) -> Self {
        Self {
            driver,
            state: SessionState::Uninitialized,
        }
    }

    /// Initialize the panel and show the welcome line
    ///
    /// Failure is logged and leaves the session `Degraded`; it is never
    /// returned as an error. Calling `begin` again on a `Ready` session does
    /// nothing, while a `Degraded` session retries initialization once.
    pub fn begin(&mut self) -> SessionState {
        if self.state == SessionState::Ready {
            return self.state;
        }

        let geometry = self.driver.geometry();
        match self.driver.initialize() {
            Ok(()) => {
                self.state = SessionState::Ready;
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "Display ready: {}x{} at {=u8:#x}",
                    geometry.width,
                    geometry.height,
                    geometry.address
                );
                self.run("begin", |driver| {
                    driver.clear_frame()?;
                    driver.set_cursor(0, 0)?;
                    driver.set_text_style(TextStyle::NORMAL)?;
                    driver.write(WELCOME_LINE)?;
                    driver.write("\n")?;
                    driver.present()
                });
            }
            Err(_e) => {
                self.state = SessionState::Degraded;
                #[cfg(feature = "defmt")]
                defmt::error!(
                    "Display init failed at {=u8:#x}: {}",
                    geometry.address,
                    _e
                );
                #[cfg(not(feature = "defmt"))]
                let _ = geometry;
            }
        }

        self.state
    }

    /// Write text at the cursor and present
    pub fn print(&mut self, text: &str) {
        self.run("print", |driver| {
            driver.write(text)?;
            driver.present()
        });
    }

    /// Blank the panel and home the cursor
    pub fn clear(&mut self) {
        self.run("clear", |driver| {
            driver.clear_frame()?;
            driver.set_cursor(0, 0)?;
            driver.present()
        });
    }

    /// Show the startup banner with a single present
    pub fn banner(&mut self, program: &str, version: &str, build: &str) {
        self.show_banner(&Banner::new(program, version, build));
    }

    /// Show a prepared banner with a single present
    pub fn show_banner(&mut self, banner: &Banner<'_>) {
        self.run("banner", |driver| {
            driver.clear_frame()?;
            driver.set_cursor(0, 0)?;
            banner.render(driver)?;
            driver.present()
        });
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether output reaches the panel
    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    /// Borrow the underlying driver
    pub fn driver(&self) -> &D {
        &*self.driver
    }

    /// Run a driver sequence if the session is ready
    ///
    /// Driver errors are logged and dropped; the sequence stops at the
    /// first failing call.
    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    fn run<F>(&mut self, op: &str, sequence: F)
    where
        F: FnOnce(&mut D) -> Result<(), DriverError>,
    {
        if self.state != SessionState::Ready {
            return;
        }
        if let Err(e) = sequence(&mut *self.driver) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Display {=str} failed: {}", op, e);
        }
    }
}
