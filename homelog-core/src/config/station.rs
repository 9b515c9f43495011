//! Station configuration
//!
//! Everything the station is told at build time: where to connect, where to
//! report, and which panel is fitted.

use heapless::Vec;

use homelog_display::PanelGeometry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{Endpoints, WifiNetwork};

/// Networks tried in order: primary, then secondary (range extender)
pub const MAX_NETWORKS: usize = 2;

/// Alert tone used when nothing else is configured
pub const DEFAULT_ALERT_TONE: u16 = 512;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No WiFi network configured
    NoNetworks,
    /// A network has an empty SSID
    EmptySsid,
    /// A passphrase is neither empty nor 8-63 characters
    PasswordLength,
    /// An endpoint is not an http(s) URL with a host
    InvalidUrl,
    /// Alert tone is zero
    ZeroTone,
    /// Display geometry is not one the SSD1306 driver can drive
    InvalidGeometry,
}

/// Complete station configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StationConfig {
    /// WiFi networks in order of preference
    pub networks: Vec<WifiNetwork, MAX_NETWORKS>,
    /// Report endpoints
    pub endpoints: Endpoints,
    /// Tone value for the alert buzzer
    #[cfg_attr(feature = "serde", serde(default = "default_alert_tone"))]
    pub alert_tone: u16,
    /// Display panel
    #[cfg_attr(feature = "serde", serde(default))]
    pub display: PanelGeometry,
}

#[cfg(feature = "serde")]
fn default_alert_tone() -> u16 {
    DEFAULT_ALERT_TONE
}

impl Default for StationConfig {
    fn default() -> Self {
        let mut networks = Vec::new();
        for (ssid, password) in [("MySSID", "12345678"), ("MySSIDextender", "12345678")] {
            if let Some(network) = WifiNetwork::new(ssid, password) {
                let _ = networks.push(network);
            }
        }

        Self {
            networks,
            endpoints: Endpoints::new(
                "http://argles.org.uk/homelog.php",
                "http://192.168.0.31/homelog.php",
            )
            .unwrap_or_default(),
            alert_tone: DEFAULT_ALERT_TONE,
            display: PanelGeometry::SSD1306_128X64,
        }
    }
}

impl StationConfig {
    /// Preferred network
    pub fn primary_network(&self) -> Option<&WifiNetwork> {
        self.networks.first()
    }

    /// Fallback network, if configured
    pub fn secondary_network(&self) -> Option<&WifiNetwork> {
        self.networks.get(1)
    }

    /// Check every section
    ///
    /// Stops at the first problem found, checking networks, endpoints, tone
    /// and display in that order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.networks.is_empty() {
            return Err(ConfigError::NoNetworks);
        }
        for network in &self.networks {
            network.validate()?;
        }

        self.endpoints.validate()?;

        if self.alert_tone == 0 {
            return Err(ConfigError::ZeroTone);
        }

        // Only SSD1306 panels are fitted
        if !self.display.is_ssd1306_supported() {
            return Err(ConfigError::InvalidGeometry);
        }

        Ok(())
    }
}
