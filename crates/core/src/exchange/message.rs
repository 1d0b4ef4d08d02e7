//! Wire messages
//!
//! Every payload is a short ASCII string with no framing header. Senders put
//! the content bytes on the wire; receivers also accept a trailing NUL.

use core::fmt::{self, Write};

use heapless::String;

use crate::radio::RadioConfig;

/// UDP port used by both roles
pub const EXCHANGE_UDP_PORT: u16 = 3333;

/// Size of a receive buffer; datagrams this large or larger are rejected
pub const MAX_DATAGRAM_LEN: usize = 128;

/// Longest payload a sender may transmit
pub const MAX_PAYLOAD_LEN: usize = MAX_DATAGRAM_LEN - 1;

/// First datagram a client sends after the link comes up
pub const ANNOUNCEMENT: &str = "Connected to UDP Client";

/// Client reply to every status report
pub const ACKNOWLEDGEMENT: &str = "Data received";

/// Message encoding / decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageError {
    /// Payload exceeds [`MAX_PAYLOAD_LEN`]
    TooLong { len: usize },
    /// Payload contains a non-ASCII byte before the terminator
    NotAscii { offset: usize },
    /// Text is not a status report
    Malformed,
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::TooLong { len } => {
                write!(f, "Payload too long: {} bytes (max {})", len, MAX_PAYLOAD_LEN)
            }
            MessageError::NotAscii { offset } => write!(f, "Non-ASCII byte at offset {}", offset),
            MessageError::Malformed => write!(f, "Malformed status report"),
        }
    }
}

/// Extract the text of a received payload.
///
/// The text ends at the first NUL (or at the end of the buffer) and must be
/// ASCII.
pub fn payload_text(bytes: &[u8]) -> Result<&str, MessageError> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let content = &bytes[..end];
    if content.len() > MAX_PAYLOAD_LEN {
        return Err(MessageError::TooLong { len: content.len() });
    }
    if let Some(offset) = content.iter().position(|b| !b.is_ascii()) {
        return Err(MessageError::NotAscii { offset });
    }
    core::str::from_utf8(content).map_err(|_| MessageError::Malformed)
}

/// Status the server streams to its client
///
/// Wire form:
/// `IP: 192.168.4.1, Port: 3333, Channel: 11, Bandwidth: 20MHz, Power: 8`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    /// AP interface address
    pub ip: [u8; 4],
    /// Listening UDP port
    pub port: u16,
    /// Primary channel
    pub channel: u8,
    /// Channel width in MHz
    pub bandwidth_mhz: u8,
    /// Maximum transmit power
    pub power: i8,
}

impl StatusReport {
    /// Build a report from the AP address and its radio settings
    pub fn from_radio(ip: [u8; 4], port: u16, radio: &RadioConfig) -> Self {
        Self {
            ip,
            port,
            channel: radio.channel,
            bandwidth_mhz: radio.bandwidth.mhz(),
            power: radio.tx_power,
        }
    }

    /// Render the wire text
    pub fn render(&self) -> Result<String<MAX_PAYLOAD_LEN>, MessageError> {
        let mut text = String::new();
        write!(text, "{}", self).map_err(|_| MessageError::TooLong {
            len: MAX_PAYLOAD_LEN + 1,
        })?;
        Ok(text)
    }

    /// Parse the wire text back into a report
    pub fn parse(text: &str) -> Result<Self, MessageError> {
        let mut fields = text.split(", ");

        let ip = field(fields.next(), "IP: ")?;
        let port = field(fields.next(), "Port: ")?;
        let channel = field(fields.next(), "Channel: ")?;
        let bandwidth = field(fields.next(), "Bandwidth: ")?;
        let power = field(fields.next(), "Power: ")?;
        if fields.next().is_some() {
            return Err(MessageError::Malformed);
        }

        let bandwidth = bandwidth
            .strip_suffix("MHz")
            .ok_or(MessageError::Malformed)?;

        Ok(Self {
            ip: crate::addr::parse_ipv4(ip).ok_or(MessageError::Malformed)?,
            port: port.parse().map_err(|_| MessageError::Malformed)?,
            channel: channel.parse().map_err(|_| MessageError::Malformed)?,
            bandwidth_mhz: bandwidth.parse().map_err(|_| MessageError::Malformed)?,
            power: power.parse().map_err(|_| MessageError::Malformed)?,
        })
    }
}

fn field<'a>(part: Option<&'a str>, label: &str) -> Result<&'a str, MessageError> {
    part.and_then(|p| p.strip_prefix(label))
        .ok_or(MessageError::Malformed)
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IP: {}.{}.{}.{}, Port: {}, Channel: {}, Bandwidth: {}MHz, Power: {}",
            self.ip[0],
            self.ip[1],
            self.ip[2],
            self.ip[3],
            self.port,
            self.channel,
            self.bandwidth_mhz,
            self.power
        )
    }
}

impl Default for StatusReport {
    fn default() -> Self {
        Self::from_radio([192, 168, 4, 1], EXCHANGE_UDP_PORT, &RadioConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::Bandwidth;

    #[test]
    fn test_render_reference_status() {
        let text = StatusReport::default().render().unwrap();
        assert_eq!(
            text.as_str(),
            "IP: 192.168.4.1, Port: 3333, Channel: 11, Bandwidth: 20MHz, Power: 8"
        );
    }

    #[test]
    fn test_from_radio() {
        let radio = RadioConfig::new(3, Bandwidth::Ht40, -2).unwrap();
        let report = StatusReport::from_radio([10, 0, 0, 1], 4000, &radio);
        assert_eq!(report.channel, 3);
        assert_eq!(report.bandwidth_mhz, 40);
        assert_eq!(report.power, -2);
        assert_eq!(
            report.render().unwrap().as_str(),
            "IP: 10.0.0.1, Port: 4000, Channel: 3, Bandwidth: 40MHz, Power: -2"
        );
    }

    #[test]
    fn test_parse_status() {
        let report =
            StatusReport::parse("IP: 192.168.4.1, Port: 3333, Channel: 6, Bandwidth: 40MHz, Power: 20")
                .unwrap();
        assert_eq!(report.ip, [192, 168, 4, 1]);
        assert_eq!(report.port, 3333);
        assert_eq!(report.channel, 6);
        assert_eq!(report.bandwidth_mhz, 40);
        assert_eq!(report.power, 20);
    }

    #[test]
    fn test_parse_rejects_other_messages() {
        assert_eq!(StatusReport::parse(ACKNOWLEDGEMENT), Err(MessageError::Malformed));
        assert_eq!(StatusReport::parse(ANNOUNCEMENT), Err(MessageError::Malformed));
        assert_eq!(
            StatusReport::parse("IP: 192.168.4.1, Port: 3333, Channel: 11, Bandwidth: 20, Power: 8"),
            Err(MessageError::Malformed)
        );
        assert_eq!(
            StatusReport::parse(
                "IP: 192.168.4.1, Port: 3333, Channel: 11, Bandwidth: 20MHz, Power: 8, Extra: 1"
            ),
            Err(MessageError::Malformed)
        );
    }

    #[test]
    fn test_payload_text_stops_at_nul() {
        assert_eq!(payload_text(b"Data received\0garbage"), Ok("Data received"));
        assert_eq!(payload_text(b"Data received"), Ok("Data received"));
        assert_eq!(payload_text(b""), Ok(""));
    }

    #[test]
    fn test_payload_text_rejects_non_ascii() {
        assert_eq!(
            payload_text(&[b'o', b'k', 0xC3, 0xA9]),
            Err(MessageError::NotAscii { offset: 2 })
        );
        // Bytes after the terminator are ignored
        assert_eq!(payload_text(&[b'o', b'k', 0, 0xFF]), Ok("ok"));
    }

    #[test]
    fn test_payload_text_length_boundary() {
        let max = [b'a'; MAX_PAYLOAD_LEN];
        assert_eq!(payload_text(&max).map(str::len), Ok(MAX_PAYLOAD_LEN));

        let over = [b'a'; MAX_DATAGRAM_LEN];
        assert_eq!(
            payload_text(&over),
            Err(MessageError::TooLong {
                len: MAX_DATAGRAM_LEN
            })
        );

        // 127 content bytes plus terminator fill the receive buffer exactly
        let mut terminated = [b'a'; MAX_DATAGRAM_LEN];
        terminated[MAX_PAYLOAD_LEN] = 0;
        assert!(payload_text(&terminated).is_ok());
    }
}
