//! Station configuration loading
//!
//! `build.rs` validates station.toml and serializes it with postcard; the
//! bytes are compiled into the image and decoded here at boot.

use defmt::*;

use homelog_core::config::StationConfig;

/// Validated station configuration, serialized at build time
static EMBEDDED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/station.postcard"));

/// Decode the embedded configuration
///
/// Falls back to the stock defaults if the image cannot be decoded.
pub fn load() -> StationConfig {
    match postcard::from_bytes::<StationConfig>(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded station config ({} bytes)", EMBEDDED_CONFIG.len());
            config
        }
        Err(_) => {
            warn!("Embedded station config unreadable, using defaults");
            StationConfig::default()
        }
    }
}

/// Log what the station was configured with
pub fn log_summary(config: &StationConfig) {
    for (i, network) in config.networks.iter().enumerate() {
        info!(
            "WiFi {}: {=str} ({=str})",
            i,
            network.ssid.as_str(),
            if network.is_open() { "open" } else { "wpa2" }
        );
    }
    info!("Website endpoint: {=str}", config.endpoints.website.as_str());
    info!("Display endpoint: {=str}", config.endpoints.display.as_str());
    info!("Alert tone: {}", config.alert_tone);
}
