//! Datagram Transport Abstraction
//!
//! The exchange engine talks to its peer through a single UDP-like endpoint:
//! send a datagram to an address, or wait a bounded time for one datagram
//! from anyone.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │           ExchangeEngine             │
//! └──────────┬───────────────────────────┘
//!            │ DatagramTransport
//!            ▼
//! ┌─────────────────────┬──────────────────────┬───────────────┐
//! │ EmbassyUdpTransport │  TokioUdpTransport   │ MockTransport │
//! │  (embassy-net, HW)  │  (host, other crate) │   (tests)     │
//! └─────────────────────┴──────────────────────┴───────────────┘
//! ```
//!
//! Binding is an inherent constructor of each implementation; a bind failure
//! is fatal for the owning task.

use core::fmt;
use core::time::Duration;

use pico_link_core::exchange::MAX_PAYLOAD_LEN;
use pico_link_core::PeerAddress;

/// No route to host
pub const EHOSTUNREACH: i32 = 113;
/// Socket not bound
pub const EBADF: i32 = 9;
/// Message too long
pub const EMSGSIZE: i32 = 90;

/// Bounded-timeout datagram endpoint
#[allow(async_fn_in_trait)]
pub trait DatagramTransport {
    /// Transmit one datagram of at most [`MAX_PAYLOAD_LEN`] bytes to `dst`
    ///
    /// Payloads of 128 bytes or more fail with [`TransportError::Oversized`]
    /// without reaching the socket.
    async fn send_to(&mut self, dst: PeerAddress, payload: &[u8]) -> Result<(), TransportError>;

    /// Wait up to `timeout` for one datagram from any source
    ///
    /// # Returns
    ///
    /// - `Ok((n, src))` - `n` bytes copied into `buf`, sent by `src`
    /// - `Err(TransportError::Timeout)` - nothing arrived in time
    /// - `Err(TransportError::Recv { .. })` - socket error
    async fn recv_from(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<(usize, PeerAddress), TransportError>;
}

/// Transport error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum TransportError {
    /// Endpoint could not be created on the local port (fatal)
    Bind { port: u16 },
    /// Transmission failed
    Send { errno: i32 },
    /// No datagram within the receive timeout
    Timeout,
    /// Receive failed
    Recv { errno: i32 },
    /// Datagram does not fit the 128-byte message bound
    Oversized { len: usize },
}

impl TransportError {
    /// Short name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportError::Bind { .. } => "Bind",
            TransportError::Send { .. } => "Send",
            TransportError::Timeout => "Timeout",
            TransportError::Recv { .. } => "Recv",
            TransportError::Oversized { .. } => "Oversized",
        }
    }

    /// POSIX errno carried by send/receive failures
    pub fn errno(&self) -> Option<i32> {
        match self {
            TransportError::Send { errno } | TransportError::Recv { errno } => Some(*errno),
            _ => None,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Bind { port } => write!(f, "Failed to bind UDP port {}", port),
            TransportError::Send { errno } => write!(f, "Send failed: errno {}", errno),
            TransportError::Timeout => write!(f, "Receive timed out"),
            TransportError::Recv { errno } => write!(f, "Receive failed: errno {}", errno),
            TransportError::Oversized { len } => {
                write!(f, "Datagram too large: {} bytes (max {})", len, MAX_PAYLOAD_LEN)
            }
        }
    }
}

/// Reject payloads that exceed the message bound
pub fn check_payload_len(payload: &[u8]) -> Result<(), TransportError> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(TransportError::Oversized { len: payload.len() });
    }
    Ok(())
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    //! Scripted transport for testing
    //!
    //! Receives pop a scripted queue (an empty queue times out immediately);
    //! sends are recorded, or fail with a configured error.

    use super::{check_payload_len, DatagramTransport, TransportError};
    use core::time::Duration;
    use heapless::{Deque, Vec};
    use pico_link_core::PeerAddress;

    /// Largest datagram the mock can script (above the 128-byte bound)
    pub const MOCK_DATAGRAM_CAPACITY: usize = 160;

    /// Scripted receive outcomes kept at once
    pub const MOCK_QUEUE_DEPTH: usize = 16;

    /// A recorded or scripted datagram
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Datagram {
        pub peer: PeerAddress,
        pub payload: Vec<u8, MOCK_DATAGRAM_CAPACITY>,
    }

    impl Datagram {
        /// Payload as text (tests only script ASCII)
        pub fn text(&self) -> &str {
            core::str::from_utf8(&self.payload).unwrap_or("")
        }
    }

    /// Mock transport for testing
    pub struct MockTransport {
        inbound: Deque<Result<Datagram, TransportError>, MOCK_QUEUE_DEPTH>,
        sent: Deque<Datagram, MOCK_QUEUE_DEPTH>,
        /// Error to return from every send_to()
        pub send_error: Option<TransportError>,
        /// Number of send_to() calls, including failed ones
        pub send_calls: usize,
        /// Number of recv_from() calls
        pub recv_calls: usize,
        /// Timeout passed to the most recent recv_from()
        pub last_timeout: Option<Duration>,
    }

    impl MockTransport {
        /// Create new mock transport
        pub fn new() -> Self {
            Self {
                inbound: Deque::new(),
                sent: Deque::new(),
                send_error: None,
                send_calls: 0,
                recv_calls: 0,
                last_timeout: None,
            }
        }

        /// Queue a datagram for a future recv_from()
        pub fn push_datagram(&mut self, peer: PeerAddress, payload: &[u8]) {
            let mut data = Vec::new();
            let len = payload.len().min(MOCK_DATAGRAM_CAPACITY);
            let _ = data.extend_from_slice(&payload[..len]);
            let _ = self.inbound.push_back(Ok(Datagram {
                peer,
                payload: data,
            }));
        }

        /// Queue a receive error for a future recv_from()
        pub fn push_recv_error(&mut self, error: TransportError) {
            let _ = self.inbound.push_back(Err(error));
        }

        /// Set error to return from send_to()
        pub fn set_send_error(&mut self, error: TransportError) {
            self.send_error = Some(error);
        }

        /// Let send_to() succeed again
        pub fn clear_send_error(&mut self) {
            self.send_error = None;
        }

        /// Datagrams successfully sent, oldest first
        pub fn sent(&self) -> impl Iterator<Item = &Datagram> {
            self.sent.iter()
        }

        /// Number of datagrams successfully sent
        pub fn sent_count(&self) -> usize {
            self.sent.len()
        }

        /// Most recently sent datagram
        pub fn last_sent(&self) -> Option<&Datagram> {
            self.sent.back()
        }

        /// Scripted receive outcomes not yet consumed
        pub fn pending_inbound(&self) -> usize {
            self.inbound.len()
        }

        /// Forget recorded sends
        pub fn clear_sent(&mut self) {
            self.sent.clear();
        }
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl DatagramTransport for MockTransport {
        async fn send_to(
            &mut self,
            dst: PeerAddress,
            payload: &[u8],
        ) -> Result<(), TransportError> {
            self.send_calls += 1;
            check_payload_len(payload)?;
            if let Some(error) = self.send_error {
                return Err(error);
            }

            let mut data = Vec::new();
            let _ = data.extend_from_slice(payload);
            if self.sent.is_full() {
                self.sent.pop_front();
            }
            let _ = self.sent.push_back(Datagram {
                peer: dst,
                payload: data,
            });
            Ok(())
        }

        async fn recv_from(
            &mut self,
            buf: &mut [u8],
            timeout: Duration,
        ) -> Result<(usize, PeerAddress), TransportError> {
            self.recv_calls += 1;
            self.last_timeout = Some(timeout);

            match self.inbound.pop_front() {
                None => Err(TransportError::Timeout),
                Some(Err(error)) => Err(error),
                Some(Ok(datagram)) => {
                    // Truncate like a UDP socket with a short buffer
                    let n = datagram.payload.len().min(buf.len());
                    buf[..n].copy_from_slice(&datagram.payload[..n]);
                    Ok((n, datagram.peer))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;

    const CLIENT: PeerAddress = PeerAddress::new([192, 168, 4, 2], 50_000);

    #[test]
    fn test_payload_bound() {
        assert!(check_payload_len(&[b'a'; MAX_PAYLOAD_LEN]).is_ok());
        assert_eq!(
            check_payload_len(&[b'a'; MAX_PAYLOAD_LEN + 1]),
            Err(TransportError::Oversized { len: 128 })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TransportError::Send { errno: EHOSTUNREACH }.to_string(),
            "Send failed: errno 113"
        );
        assert_eq!(
            TransportError::Bind { port: 3333 }.to_string(),
            "Failed to bind UDP port 3333"
        );
    }

    #[tokio::test]
    async fn test_mock_records_sends() {
        let mut transport = MockTransport::new();
        transport.send_to(CLIENT, b"hello").await.unwrap();

        assert_eq!(transport.sent_count(), 1);
        let sent = transport.last_sent().unwrap();
        assert_eq!(sent.peer, CLIENT);
        assert_eq!(sent.text(), "hello");
    }

    #[tokio::test]
    async fn test_mock_rejects_oversized_send() {
        let mut transport = MockTransport::new();
        let result = transport.send_to(CLIENT, &[b'x'; 128]).await;
        assert_eq!(result, Err(TransportError::Oversized { len: 128 }));
        assert_eq!(transport.sent_count(), 0);

        transport.send_to(CLIENT, &[b'x'; 127]).await.unwrap();
        assert_eq!(transport.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_send_error() {
        let mut transport = MockTransport::new();
        transport.set_send_error(TransportError::Send { errno: EHOSTUNREACH });

        let result = transport.send_to(CLIENT, b"x").await;
        assert_eq!(result, Err(TransportError::Send { errno: EHOSTUNREACH }));
        assert_eq!(transport.send_calls, 1);
        assert_eq!(transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_scripted_receive() {
        let mut transport = MockTransport::new();
        transport.push_datagram(CLIENT, b"Data received");
        transport.push_recv_error(TransportError::Recv { errno: EBADF });

        let mut buf = [0u8; 128];
        let (n, src) = transport
            .recv_from(&mut buf, Duration::from_secs(10))
            .await
            .unwrap();
        assert_eq!(&buf[..n], b"Data received");
        assert_eq!(src, CLIENT);
        assert_eq!(transport.last_timeout, Some(Duration::from_secs(10)));

        let result = transport.recv_from(&mut buf, Duration::from_secs(10)).await;
        assert_eq!(result, Err(TransportError::Recv { errno: EBADF }));

        // Script exhausted
        let result = transport.recv_from(&mut buf, Duration::from_secs(10)).await;
        assert_eq!(result, Err(TransportError::Timeout));
        assert_eq!(transport.recv_calls, 3);
    }
}
