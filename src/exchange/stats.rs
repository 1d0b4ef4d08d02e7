//! Exchange statistics

/// Counters kept by an exchange engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExchangeStats {
    /// Datagrams transmitted successfully
    pub datagrams_sent: u32,
    /// Datagrams received and accepted
    pub datagrams_received: u32,
    /// Failed transmissions (including oversized payloads)
    pub send_failures: u32,
    /// Receives that timed out
    pub recv_timeouts: u32,
    /// Receives that failed or returned an unusable datagram
    pub recv_failures: u32,
    /// Streaming -> AwaitingPeer transitions
    pub demotions: u32,
    /// Transitions to AwaitingLink caused by the link going down
    pub link_losses: u32,
}

impl ExchangeStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }
}
