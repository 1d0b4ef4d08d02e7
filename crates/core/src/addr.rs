//! IPv4 peer addressing.

use core::fmt;
use core::net::{Ipv4Addr, SocketAddrV4};

/// UDP endpoint of a correspondent (IPv4 + port)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerAddress {
    /// IPv4 address octets
    pub ip: [u8; 4],
    /// UDP port
    pub port: u16,
}

impl PeerAddress {
    /// Create a new peer address
    pub const fn new(ip: [u8; 4], port: u16) -> Self {
        Self { ip, port }
    }

    /// Wildcard address bound by a listening socket
    pub const fn unspecified(port: u16) -> Self {
        Self::new([0, 0, 0, 0], port)
    }

    /// Returns true for the 0.0.0.0 wildcard
    pub fn is_unspecified(&self) -> bool {
        self.ip == [0, 0, 0, 0]
    }
}

impl From<SocketAddrV4> for PeerAddress {
    fn from(addr: SocketAddrV4) -> Self {
        Self::new(addr.ip().octets(), addr.port())
    }
}

impl From<PeerAddress> for SocketAddrV4 {
    fn from(addr: PeerAddress) -> Self {
        SocketAddrV4::new(Ipv4Addr::from(addr.ip), addr.port)
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}:{}",
            self.ip[0], self.ip[1], self.ip[2], self.ip[3], self.port
        )
    }
}

/// Parse a dotted-quad IPv4 address ("192.168.4.1")
pub fn parse_ipv4(s: &str) -> Option<[u8; 4]> {
    s.parse::<Ipv4Addr>().ok().map(|ip| ip.octets())
}
