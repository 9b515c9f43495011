//! HomeLog - Station Firmware
//!
//! Boot firmware for RP2040-based HomeLog stations: loads the build-time
//! station configuration, brings up the SSD1306 status panel on I2C0 and
//! shows the startup banner.

#![no_std]
#![no_main]

use core::fmt::Write;
use core::write;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use homelog_display::{DisplaySession, SessionState};
use homelog_drivers::display::Ssd1306;

mod config;

/// Program name shown on the banner
const PROGRAM: &str = "HomeLog";

/// Fast-mode I2C; the SSD1306 is rated for 400 kHz
const I2C_FREQUENCY: u32 = 400_000;

type Panel = Ssd1306<I2c<'static, I2C0, Blocking>>;

// The panel lives for the whole program; the session borrows it
static PANEL: StaticCell<Panel> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("HomeLog firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let station = config::load();
    config::log_summary(&station);

    // I2C0 on GPIO4 (SDA) / GPIO5 (SCL)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY;
    let bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let panel = PANEL.init(Ssd1306::new(bus, station.display));
    let mut display = DisplaySession::new(panel);

    match display.begin() {
        SessionState::Ready => info!("Display session ready"),
        state => warn!("Display unavailable ({}), continuing headless", state),
    }

    display.banner(PROGRAM, env!("CARGO_PKG_VERSION"), env!("HOMELOG_BUILD"));

    if let Some(network) = station.primary_network() {
        let mut line: heapless::String<40> = heapless::String::new();
        if write!(line, "WiFi: {}", network.ssid).is_ok() {
            display.print(&line);
        }
    }

    info!("Boot complete");

    loop {
        Timer::after_secs(60).await;
        trace!("idle");
    }
}
