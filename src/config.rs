//! Build-time link settings
//!
//! Defaults are provided at build time via environment variables, forwarded
//! by `build.rs`:
//!
//! - `LINK_SSID` - Access point SSID (max 32 chars)
//! - `LINK_PASSWORD` - WPA2 passphrase (max 63 chars)
//! - `LINK_CHANNEL` - Primary channel (1..=14)
//! - `LINK_BANDWIDTH` - Channel width in MHz (20 or 40)
//! - `LINK_TX_POWER` - Maximum transmit power reported in the status
//! - `LINK_AP_IP` - Access point interface address
//! - `LINK_STA_IP` - Station interface address
//! - `LINK_SERVER_IP` - Address the station sends its datagrams to
//! - `LINK_PORT` - UDP port of the exchange
//!
//! A value that fails to parse falls back to the reference setting.

use heapless::String;
use pico_link_core::addr::parse_ipv4;
use pico_link_core::exchange::{StatusReport, EXCHANGE_UDP_PORT};
use pico_link_core::radio::{Bandwidth, RadioConfig};
use pico_link_core::PeerAddress;

/// Maximum SSID length (IEEE 802.11 standard)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WiFi password length (WPA2 standard)
pub const MAX_PASSWORD_LEN: usize = 63;

/// Reference SSID
pub const DEFAULT_SSID: &str = "PICO_LINK_AP";

/// Reference access point address
pub const DEFAULT_AP_IP: [u8; 4] = [192, 168, 4, 1];

/// Reference station address
pub const DEFAULT_STA_IP: [u8; 4] = [192, 168, 4, 2];

/// Link settings shared by both roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParams {
    /// Access point SSID
    pub ssid: String<MAX_SSID_LEN>,
    /// WPA2 passphrase (empty for an open network)
    pub password: String<MAX_PASSWORD_LEN>,
    /// Channel, width and transmit power
    pub radio: RadioConfig,
    /// Access point interface address
    pub ap_ip: [u8; 4],
    /// Station interface address
    pub sta_ip: [u8; 4],
    /// Address the client sends to
    pub server_ip: [u8; 4],
    /// UDP port of the exchange
    pub port: u16,
}

impl LinkParams {
    /// Load settings injected by `build.rs`
    pub fn from_build_env() -> Self {
        Self::from_values(
            env!("LINK_SSID"),
            env!("LINK_PASSWORD"),
            env!("LINK_CHANNEL"),
            env!("LINK_BANDWIDTH"),
            env!("LINK_TX_POWER"),
            env!("LINK_AP_IP"),
            env!("LINK_STA_IP"),
            env!("LINK_SERVER_IP"),
            env!("LINK_PORT"),
        )
    }

    /// Parse settings from their text form, falling back per field
    #[allow(clippy::too_many_arguments)]
    pub fn from_values(
        ssid: &str,
        password: &str,
        channel: &str,
        bandwidth: &str,
        tx_power: &str,
        ap_ip: &str,
        sta_ip: &str,
        server_ip: &str,
        port: &str,
    ) -> Self {
        let defaults = Self::default();

        let ssid = if ssid.is_empty() {
            defaults.ssid.clone()
        } else {
            String::try_from(ssid).unwrap_or_else(|_| defaults.ssid.clone())
        };
        let password = String::try_from(password).unwrap_or_else(|_| String::new());

        let radio = RadioConfig::new(
            channel.parse().unwrap_or(defaults.radio.channel),
            bandwidth
                .parse()
                .ok()
                .and_then(|mhz| Bandwidth::from_mhz(mhz).ok())
                .unwrap_or(defaults.radio.bandwidth),
            tx_power.parse().unwrap_or(defaults.radio.tx_power),
        )
        .unwrap_or(defaults.radio);

        Self {
            ssid,
            password,
            radio,
            ap_ip: parse_ipv4(ap_ip).unwrap_or(defaults.ap_ip),
            sta_ip: parse_ipv4(sta_ip).unwrap_or(defaults.sta_ip),
            server_ip: parse_ipv4(server_ip).unwrap_or(defaults.server_ip),
            port: port.parse().unwrap_or(defaults.port),
        }
    }

    /// True when the access point should require WPA2
    pub fn is_secured(&self) -> bool {
        !self.password.is_empty()
    }

    /// Status the server reports on every streaming tick
    pub fn status_report(&self) -> StatusReport {
        StatusReport::from_radio(self.ap_ip, self.port, &self.radio)
    }

    /// Fixed server address used by the client
    pub fn server_address(&self) -> PeerAddress {
        PeerAddress::new(self.server_ip, self.port)
    }
}

impl Default for LinkParams {
    fn default() -> Self {
        Self {
            ssid: String::try_from(DEFAULT_SSID).unwrap_or_default(),
            password: String::new(),
            radio: RadioConfig::default(),
            ap_ip: DEFAULT_AP_IP,
            sta_ip: DEFAULT_STA_IP,
            server_ip: DEFAULT_AP_IP,
            port: EXCHANGE_UDP_PORT,
        }
    }
}
