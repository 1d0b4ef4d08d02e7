//! RP2350 datagram transport
//!
//! [`EmbassyUdpTransport`] implements the exchange's datagram transport on
//! the embassy-net stack brought up by [`super::network`].

pub mod udp;

pub use udp::EmbassyUdpTransport;
