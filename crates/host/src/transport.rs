//! Tokio UDP transport
//!
//! [`DatagramTransport`] over `tokio::net::UdpSocket`. Receives are bounded
//! with `tokio::time::timeout`; socket errors keep their OS errno.

use std::io;
use std::net::{SocketAddr, SocketAddrV4};
use std::time::Duration;

use pico_link::transport::{
    check_payload_len, DatagramTransport, TransportError, EBADF, EHOSTUNREACH,
};
use pico_link_core::PeerAddress;
use tokio::net::UdpSocket;

/// UDP transport on the host network stack
pub struct TokioUdpTransport {
    socket: UdpSocket,
    local: SocketAddrV4,
}

impl TokioUdpTransport {
    /// Bind to `addr` (port 0 picks an ephemeral port)
    ///
    /// # Errors
    ///
    /// `TransportError::Bind` if the address is in use or not local
    pub async fn bind(addr: SocketAddrV4) -> Result<Self, TransportError> {
        let bind_error = TransportError::Bind { port: addr.port() };

        let socket = UdpSocket::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind UDP socket to {addr}: {e}");
            bind_error
        })?;
        let local = match socket.local_addr() {
            Ok(SocketAddr::V4(local)) => local,
            _ => return Err(bind_error),
        };

        tracing::info!("UDP socket bound to {local}");
        Ok(Self { socket, local })
    }

    /// Address the socket is bound to
    pub fn local_addr(&self) -> SocketAddrV4 {
        self.local
    }

    /// Bound address as a protocol peer address
    pub fn local_peer(&self) -> PeerAddress {
        PeerAddress::from(self.local)
    }
}

impl DatagramTransport for TokioUdpTransport {
    async fn send_to(&mut self, dst: PeerAddress, payload: &[u8]) -> Result<(), TransportError> {
        check_payload_len(payload)?;
        let dst = SocketAddrV4::from(dst);
        self.socket
            .send_to(payload, dst)
            .await
            .map(|_| ())
            .map_err(|e| TransportError::Send {
                errno: errno_or(&e, EHOSTUNREACH),
            })
    }

    async fn recv_from(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<(usize, PeerAddress), TransportError> {
        match tokio::time::timeout(timeout, self.socket.recv_from(buf)).await {
            Err(_) => Err(TransportError::Timeout),
            Ok(Err(e)) => Err(TransportError::Recv {
                errno: errno_or(&e, EBADF),
            }),
            Ok(Ok((n, SocketAddr::V4(src)))) => Ok((n, PeerAddress::from(src))),
            Ok(Ok((_, SocketAddr::V6(src)))) => {
                tracing::warn!("Ignoring IPv6 datagram from {src}");
                Err(TransportError::Recv { errno: EBADF })
            }
        }
    }
}

fn errno_or(error: &io::Error, fallback: i32) -> i32 {
    error.raw_os_error().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn loopback() -> SocketAddrV4 {
        SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0)
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let transport = TokioUdpTransport::bind(loopback()).await.unwrap();
        assert_ne!(transport.local_addr().port(), 0);
        assert_eq!(transport.local_peer().ip, [127, 0, 0, 1]);
    }

    #[tokio::test]
    async fn test_bind_port_in_use() {
        let first = TokioUdpTransport::bind(loopback()).await.unwrap();
        let taken = first.local_addr();

        let result = TokioUdpTransport::bind(taken).await;
        assert_eq!(
            result.err(),
            Some(TransportError::Bind { port: taken.port() })
        );
    }

    #[tokio::test]
    async fn test_send_and_receive() {
        let mut a = TokioUdpTransport::bind(loopback()).await.unwrap();
        let mut b = TokioUdpTransport::bind(loopback()).await.unwrap();

        a.send_to(b.local_peer(), b"Connected to UDP Client")
            .await
            .unwrap();

        let mut buf = [0u8; 129];
        let (n, src) = b
            .recv_from(&mut buf, Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(&buf[..n], b"Connected to UDP Client");
        assert_eq!(src, a.local_peer());
    }

    #[tokio::test]
    async fn test_receive_timeout() {
        let mut transport = TokioUdpTransport::bind(loopback()).await.unwrap();
        let mut buf = [0u8; 129];

        let result = transport
            .recv_from(&mut buf, Duration::from_millis(20))
            .await;
        assert_eq!(result, Err(TransportError::Timeout));
    }

    #[tokio::test]
    async fn test_oversized_send_rejected() {
        let mut a = TokioUdpTransport::bind(loopback()).await.unwrap();
        let b = TokioUdpTransport::bind(loopback()).await.unwrap();

        let payload = [b'x'; 128];
        let result = a.send_to(b.local_peer(), &payload).await;
        assert_eq!(result, Err(TransportError::Oversized { len: 128 }));

        let payload = [b'x'; 127];
        assert!(a.send_to(b.local_peer(), &payload).await.is_ok());
    }
}
