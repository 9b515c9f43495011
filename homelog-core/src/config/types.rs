//! Network and endpoint configuration types

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::station::ConfigError;

/// Maximum SSID length (802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;

/// Minimum WPA2 passphrase length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum endpoint URL length
pub const MAX_URL_LEN: usize = 96;

/// A WiFi network the station may join
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WifiNetwork {
    /// Network name
    pub ssid: String<MAX_SSID_LEN>,
    /// Passphrase (empty for an open network)
    pub password: String<MAX_PASSWORD_LEN>,
}

impl WifiNetwork {
    /// Create a network entry, or `None` if either field is too long
    pub fn new(ssid: &str, password: &str) -> Option<Self> {
        let mut network = Self::default();
        network.ssid.push_str(ssid).ok()?;
        network.password.push_str(password).ok()?;
        Some(network)
    }

    /// Whether the network needs no passphrase
    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }

    /// Check the SSID and passphrase
    ///
    /// WPA2 passphrases are 8 to 63 characters; an empty passphrase means an
    /// open network.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ssid.is_empty() {
            return Err(ConfigError::EmptySsid);
        }
        let len = self.password.len();
        if !self.is_open() && !(MIN_PASSWORD_LEN..MAX_PASSWORD_LEN).contains(&len) {
            return Err(ConfigError::PasswordLength);
        }
        Ok(())
    }
}

/// HTTP endpoints readings are reported to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Endpoints {
    /// Public website logger
    pub website: String<MAX_URL_LEN>,
    /// Local display server
    pub display: String<MAX_URL_LEN>,
}

impl Endpoints {
    /// Create endpoints, or `None` if either URL is too long
    pub fn new(website: &str, display: &str) -> Option<Self> {
        let mut endpoints = Self::default();
        endpoints.website.push_str(website).ok()?;
        endpoints.display.push_str(display).ok()?;
        Some(endpoints)
    }

    /// Check both URLs
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url(&self.website)?;
        validate_url(&self.display)
    }
}

/// Check a URL has an http(s) scheme and a host
pub fn validate_url(url: &str) -> Result<(), ConfigError> {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or(ConfigError::InvalidUrl)?;

    let host = rest.split('/').next().unwrap_or("");
    if host.is_empty() || url.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidUrl);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_fields() {
        let network = WifiNetwork::new("MySSID", "12345678").unwrap();
        assert_eq!(network.ssid.as_str(), "MySSID");
        assert!(!network.is_open());
        assert!(network.validate().is_ok());
    }

    #[test]
    fn test_open_network() {
        let network = WifiNetwork::new("Cafe", "").unwrap();
        assert!(network.is_open());
        assert!(network.validate().is_ok());
    }

    #[test]
    fn test_network_too_long() {
        let ssid = "a-very-long-network-name-over-32-bytes";
        assert!(WifiNetwork::new(ssid, "12345678").is_none());
    }

    #[test]
    fn test_network_validation() {
        let empty = WifiNetwork::new("", "12345678").unwrap();
        assert_eq!(empty.validate(), Err(ConfigError::EmptySsid));

        let short = WifiNetwork::new("Home", "1234").unwrap();
        assert_eq!(short.validate(), Err(ConfigError::PasswordLength));

        let long = core::str::from_utf8(&[b'x'; 64]).unwrap();
        let long = WifiNetwork::new("Home", long).unwrap();
        assert_eq!(long.validate(), Err(ConfigError::PasswordLength));
    }

    #[test]
    fn test_url_validation() {
        assert!(validate_url("http://argles.org.uk/homelog.php").is_ok());
        assert!(validate_url("https://192.168.0.31").is_ok());
        assert_eq!(validate_url("ftp://host/x"), Err(ConfigError::InvalidUrl));
        assert_eq!(validate_url("http:///homelog.php"), Err(ConfigError::InvalidUrl));
        assert_eq!(validate_url("http://my host/x"), Err(ConfigError::InvalidUrl));
    }
}
