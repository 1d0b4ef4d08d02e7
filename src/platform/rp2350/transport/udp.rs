//! UDP datagram transport (RP2350 Platform)
//!
//! [`DatagramTransport`] over an embassy-net `UdpSocket`. Receives are bounded
//! with `embassy_time::with_timeout`; embassy-net send errors have no errno
//! and are mapped to the closest POSIX code.
//!
//! # Memory Usage
//!
//! Socket buffers are owned by the caller (the exchange task keeps them on
//! its stack): four metadata slots and 1 KiB per direction for a single peer.

use core::time::Duration;

use embassy_net::udp::{PacketMetadata, RecvError, SendError, UdpSocket};
use embassy_net::{IpAddress, IpEndpoint, Ipv4Address, Stack};
use pico_link_core::PeerAddress;

use crate::transport::{
    check_payload_len, DatagramTransport, TransportError, EBADF, EHOSTUNREACH, EMSGSIZE,
};

/// Packet metadata slots per direction
pub const SOCKET_META_SLOTS: usize = 4;

/// Socket buffer size per direction
pub const SOCKET_BUFFER_LEN: usize = 1024;

/// UDP transport on the embassy-net stack
pub struct EmbassyUdpTransport<'a> {
    socket: UdpSocket<'a>,
    port: u16,
}

impl<'a> EmbassyUdpTransport<'a> {
    /// Create the socket and bind it to `port`
    ///
    /// # Errors
    ///
    /// `TransportError::Bind` if the port is already in use or invalid
    pub fn bind(
        stack: Stack<'a>,
        port: u16,
        rx_meta: &'a mut [PacketMetadata],
        rx_buffer: &'a mut [u8],
        tx_meta: &'a mut [PacketMetadata],
        tx_buffer: &'a mut [u8],
    ) -> Result<Self, TransportError> {
        let mut socket = UdpSocket::new(stack, rx_meta, rx_buffer, tx_meta, tx_buffer);

        match socket.bind(port) {
            Ok(()) => {
                crate::log_info!("UDP socket bound to port {}", port);
                Ok(Self { socket, port })
            }
            Err(_) => {
                crate::log_error!("Failed to bind UDP socket to port {}", port);
                Err(TransportError::Bind { port })
            }
        }
    }

    /// Local port
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl<'a> DatagramTransport for EmbassyUdpTransport<'a> {
    async fn send_to(&mut self, dst: PeerAddress, payload: &[u8]) -> Result<(), TransportError> {
        check_payload_len(payload)?;
        self.socket
            .send_to(payload, endpoint_from_peer(dst))
            .await
            .map_err(|e| TransportError::Send {
                errno: send_errno(e),
            })
    }

    async fn recv_from(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<(usize, PeerAddress), TransportError> {
        let timeout = embassy_time::Duration::from_micros(timeout.as_micros() as u64);
        match embassy_time::with_timeout(timeout, self.socket.recv_from(buf)).await {
            Err(_) => Err(TransportError::Timeout),
            Ok(Err(RecvError::Truncated)) => Err(TransportError::Oversized { len: buf.len() }),
            #[allow(unreachable_patterns)]
            Ok(Err(_)) => Err(TransportError::Recv { errno: EBADF }),
            Ok(Ok((n, meta))) => match peer_from_endpoint(meta.endpoint) {
                Some(src) => Ok((n, src)),
                None => Err(TransportError::Recv { errno: EBADF }),
            },
        }
    }
}

fn send_errno(error: SendError) -> i32 {
    match error {
        SendError::NoRoute => EHOSTUNREACH,
        SendError::SocketNotBound => EBADF,
        SendError::PacketTooLarge => EMSGSIZE,
        #[allow(unreachable_patterns)]
        _ => EHOSTUNREACH,
    }
}

fn endpoint_from_peer(peer: PeerAddress) -> IpEndpoint {
    let [a, b, c, d] = peer.ip;
    IpEndpoint::new(IpAddress::Ipv4(Ipv4Address::new(a, b, c, d)), peer.port)
}

fn peer_from_endpoint(endpoint: IpEndpoint) -> Option<PeerAddress> {
    #[allow(unreachable_patterns)]
    match endpoint.addr {
        IpAddress::Ipv4(ip) => Some(PeerAddress::new(ip.octets(), endpoint.port)),
        _ => None,
    }
}
