//! Exchange engine
//!
//! One engine runs per role in a single task. Each [`tick`](ExchangeEngine::tick)
//! performs at most one step of the protocol:
//!
//! | Phase        | Server                                   | Client                          |
//! |--------------|------------------------------------------|---------------------------------|
//! | AwaitingLink | park until the link is up                | park until the link is up       |
//! | AwaitingPeer | receive a greeting, record its source    | send the announcement           |
//! | Streaming    | send status, receive the acknowledgement | receive status, send ack        |
//!
//! The link state is checked first on every tick; a down link sends any
//! phase back to AwaitingLink and discards the peer. A failure while
//! streaming demotes to AwaitingPeer. Transport failures never leave the
//! engine: they are logged, counted and recovered from on the next tick.

use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::String;
use pico_link_core::exchange::{
    payload_text, StatusReport, ACKNOWLEDGEMENT, ANNOUNCEMENT, MAX_DATAGRAM_LEN, MAX_PAYLOAD_LEN,
};
use pico_link_core::PeerAddress;

use super::{ExchangeConfig, ExchangePhase, ExchangeStats, Role};
use crate::link::LinkGate;
use crate::transport::{DatagramTransport, TransportError};

/// Protocol state machine for one role
pub struct ExchangeEngine<'g, T, M>
where
    T: DatagramTransport,
    M: RawMutex,
{
    role: Role,
    transport: T,
    gate: &'g LinkGate<M>,
    config: ExchangeConfig,
    phase: ExchangePhase,
    peer: Option<PeerAddress>,
    stats: ExchangeStats,
    last_received: String<MAX_PAYLOAD_LEN>,
}

impl<'g, T, M> ExchangeEngine<'g, T, M>
where
    T: DatagramTransport,
    M: RawMutex,
{
    /// Create an engine in the AwaitingLink phase
    pub fn new(role: Role, transport: T, gate: &'g LinkGate<M>, config: ExchangeConfig) -> Self {
        Self {
            role,
            transport,
            gate,
            config,
            phase: ExchangePhase::AwaitingLink,
            peer: None,
            stats: ExchangeStats::new(),
            last_received: String::new(),
        }
    }

    /// Run one protocol step and return the resulting phase
    pub async fn tick(&mut self) -> ExchangePhase {
        if !self.gate.is_up() {
            if self.phase.needs_link() {
                self.lose_link();
            } else {
                crate::log_debug!("{}: waiting for link", self.role.name());
                self.gate.wait_until_up().await;
            }
            return self.phase;
        }

        match (self.phase, self.role) {
            (ExchangePhase::AwaitingLink, _) => {
                self.set_phase(ExchangePhase::AwaitingPeer);
            }
            (ExchangePhase::AwaitingPeer, Role::Server { .. }) => self.await_greeting().await,
            (ExchangePhase::AwaitingPeer, Role::Client { server }) => self.announce(server).await,
            (ExchangePhase::Streaming, Role::Server { status }) => {
                self.stream_status(status).await
            }
            (ExchangePhase::Streaming, Role::Client { server }) => {
                self.acknowledge_status(server).await
            }
        }

        self.phase
    }

    /// Current phase
    pub fn phase(&self) -> ExchangePhase {
        self.phase
    }

    /// Confirmed correspondent, if any
    pub fn peer(&self) -> Option<PeerAddress> {
        self.peer
    }

    /// Counters since creation
    pub fn stats(&self) -> &ExchangeStats {
        &self.stats
    }

    /// Text of the most recently accepted datagram
    pub fn last_received(&self) -> &str {
        self.last_received.as_str()
    }

    /// Role this engine plays
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Timing configuration
    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Underlying transport (mutable)
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // Server: block (bounded) for the first datagram and adopt its source
    async fn await_greeting(&mut self) {
        if let Some(src) = self.receive().await {
            crate::log_info!(
                "Greeting from {}.{}.{}.{}:{}: {}",
                src.ip[0],
                src.ip[1],
                src.ip[2],
                src.ip[3],
                src.port,
                self.last_received.as_str()
            );
            self.peer = Some(src);
            self.set_phase(ExchangePhase::Streaming);
        }
    }

    // Client: announce to the fixed server address
    async fn announce(&mut self, server: PeerAddress) {
        if self.send(server, ANNOUNCEMENT.as_bytes()).await {
            crate::log_info!(
                "Announced to {}.{}.{}.{}:{}",
                server.ip[0],
                server.ip[1],
                server.ip[2],
                server.ip[3],
                server.port
            );
            self.peer = Some(server);
            self.set_phase(ExchangePhase::Streaming);
        }
    }

    // Server: status out, acknowledgement back
    async fn stream_status(&mut self, status: StatusReport) {
        let Some(peer) = self.peer else {
            self.demote("no peer");
            return;
        };

        let text = match status.render() {
            Ok(text) => text,
            Err(_) => {
                crate::log_error!("Status report does not fit a datagram");
                self.demote("status render failed");
                return;
            }
        };

        if !self.send(peer, text.as_bytes()).await {
            self.demote("status send failed");
            return;
        }
        crate::log_debug!("Status sent: {}", text.as_str());

        match self.receive().await {
            Some(src) => {
                crate::log_debug!("Ack: {}", self.last_received.as_str());
                self.peer = Some(src);
            }
            None => self.demote("no acknowledgement"),
        }
    }

    // Client: status in, acknowledgement out
    async fn acknowledge_status(&mut self, server: PeerAddress) {
        if self.receive().await.is_none() {
            self.demote("no status");
            return;
        }

        match StatusReport::parse(self.last_received.as_str()) {
            Ok(report) => crate::log_info!(
                "AP {}.{}.{}.{} port {} channel {} bandwidth {}MHz power {}",
                report.ip[0],
                report.ip[1],
                report.ip[2],
                report.ip[3],
                report.port,
                report.channel,
                report.bandwidth_mhz,
                report.power
            ),
            Err(_) => crate::log_info!("Received: {}", self.last_received.as_str()),
        }

        if !self.send(server, ACKNOWLEDGEMENT.as_bytes()).await {
            self.demote("ack send failed");
        }
    }

    async fn send(&mut self, dst: PeerAddress, payload: &[u8]) -> bool {
        match self.transport.send_to(dst, payload).await {
            Ok(()) => {
                self.stats.datagrams_sent += 1;
                true
            }
            Err(e) => {
                self.stats.send_failures += 1;
                crate::log_warn!(
                    "{}: send to {}.{}.{}.{}:{} failed: {} (errno {})",
                    self.role.name(),
                    dst.ip[0],
                    dst.ip[1],
                    dst.ip[2],
                    dst.ip[3],
                    dst.port,
                    e.as_str(),
                    e.errno().unwrap_or(0)
                );
                false
            }
        }
    }

    // Receive one datagram into `last_received`; None on any failure
    async fn receive(&mut self) -> Option<PeerAddress> {
        let mut buf = [0u8; MAX_DATAGRAM_LEN + 1];
        let (n, src) = match self
            .transport
            .recv_from(&mut buf, self.config.reply_timeout)
            .await
        {
            Ok(received) => received,
            Err(TransportError::Timeout) => {
                self.stats.recv_timeouts += 1;
                crate::log_debug!("{}: receive timed out", self.role.name());
                return None;
            }
            Err(e) => {
                self.stats.recv_failures += 1;
                crate::log_warn!(
                    "{}: receive failed: {} (errno {})",
                    self.role.name(),
                    e.as_str(),
                    e.errno().unwrap_or(0)
                );
                return None;
            }
        };

        // The buffer holds one byte more than a datagram may carry, so a
        // full buffer means the datagram was cut short
        if n > MAX_DATAGRAM_LEN {
            self.stats.recv_failures += 1;
            crate::log_warn!("{}: dropped oversized datagram ({} bytes)", self.role.name(), n);
            return None;
        }

        match payload_text(&buf[..n]) {
            Ok(text) => {
                self.last_received.clear();
                // Fits: payload_text bounds the text to MAX_PAYLOAD_LEN
                let _ = self.last_received.push_str(text);
                self.stats.datagrams_received += 1;
                Some(src)
            }
            Err(_) => {
                self.stats.recv_failures += 1;
                crate::log_warn!(
                    "{}: dropped datagram that is not 127-byte ASCII text",
                    self.role.name()
                );
                None
            }
        }
    }

    fn demote(&mut self, reason: &str) {
        crate::log_warn!("{}: peer lost ({})", self.role.name(), reason);
        self.peer = None;
        self.stats.demotions += 1;
        self.set_phase(ExchangePhase::AwaitingPeer);
    }

    fn lose_link(&mut self) {
        self.peer = None;
        self.stats.link_losses += 1;
        self.set_phase(ExchangePhase::AwaitingLink);
    }

    fn set_phase(&mut self, phase: ExchangePhase) {
        if self.phase != phase {
            crate::log_info!(
                "{}: {} -> {}",
                self.role.name(),
                self.phase.as_str(),
                phase.as_str()
            );
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{HardwareAddr, LinkEvent};
    use crate::transport::mock::MockTransport;
    use crate::transport::{EBADF, EHOSTUNREACH};
    use core::time::Duration;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    type Gate = LinkGate<CriticalSectionRawMutex>;
    type Engine<'g> = ExchangeEngine<'g, MockTransport, CriticalSectionRawMutex>;

    const MAC: HardwareAddr = HardwareAddr([0x02, 0, 0, 0, 0, 0x42]);
    const SERVER: PeerAddress = PeerAddress::new([192, 168, 4, 1], 3333);
    const CLIENT: PeerAddress = PeerAddress::new([192, 168, 4, 2], 3333);
    const REFERENCE_STATUS: &str =
        "IP: 192.168.4.1, Port: 3333, Channel: 11, Bandwidth: 20MHz, Power: 8";

    fn link_up(gate: &Gate) {
        gate.on_link_event(LinkEvent::Associated { peer: MAC });
    }

    fn link_down(gate: &Gate) {
        gate.on_link_event(LinkEvent::Disassociated { peer: MAC });
    }

    fn server(gate: &Gate) -> Engine<'_> {
        let role = Role::Server {
            status: StatusReport::default(),
        };
        ExchangeEngine::new(role, MockTransport::new(), gate, ExchangeConfig::default())
    }

    fn client(gate: &Gate) -> Engine<'_> {
        let role = Role::Client { server: SERVER };
        ExchangeEngine::new(role, MockTransport::new(), gate, ExchangeConfig::default())
    }

    /// Drive a server into Streaming with CLIENT as its peer
    async fn streaming_server(gate: &Gate) -> Engine<'_> {
        link_up(gate);
        let mut engine = server(gate);
        engine.tick().await;
        engine
            .transport_mut()
            .push_datagram(CLIENT, ANNOUNCEMENT.as_bytes());
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);
        engine
    }

    #[tokio::test]
    async fn test_awaiting_link_blocks_while_down() {
        let gate = Gate::new();
        let mut engine = server(&gate);

        let result = tokio::time::timeout(Duration::from_millis(50), engine.tick()).await;
        assert!(result.is_err(), "tick must park while the link is down");
        assert_eq!(engine.phase(), ExchangePhase::AwaitingLink);
        assert_eq!(engine.transport().recv_calls, 0);
    }

    #[tokio::test]
    async fn test_link_up_moves_to_awaiting_peer_without_io() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = client(&gate);

        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        assert_eq!(engine.transport().send_calls, 0);
        assert_eq!(engine.transport().recv_calls, 0);
    }

    #[tokio::test]
    async fn test_server_never_transmits_before_receiving() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = server(&gate);

        for _ in 0..5 {
            engine.tick().await;
        }

        assert_eq!(engine.phase(), ExchangePhase::AwaitingPeer);
        assert_eq!(engine.transport().send_calls, 0);
        assert_eq!(engine.stats().recv_timeouts, 4);
        assert_eq!(
            engine.transport().last_timeout,
            Some(Duration::from_secs(10))
        );
    }

    #[tokio::test]
    async fn test_server_records_peer_and_streams_reference_status() {
        let gate = Gate::new();
        let mut engine = streaming_server(&gate).await;
        assert_eq!(engine.peer(), Some(CLIENT));
        assert_eq!(engine.last_received(), ANNOUNCEMENT);

        engine
            .transport_mut()
            .push_datagram(CLIENT, ACKNOWLEDGEMENT.as_bytes());
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);

        let sent = engine.transport().last_sent().unwrap();
        assert_eq!(sent.peer, CLIENT);
        assert_eq!(sent.text(), REFERENCE_STATUS);
        assert_eq!(engine.last_received(), ACKNOWLEDGEMENT);
        assert_eq!(engine.stats().datagrams_sent, 1);
        assert_eq!(engine.stats().datagrams_received, 2);
    }

    #[tokio::test]
    async fn test_server_adopts_ack_source_as_peer() {
        let gate = Gate::new();
        let mut engine = streaming_server(&gate).await;

        let moved = PeerAddress::new([192, 168, 4, 2], 50_001);
        engine
            .transport_mut()
            .push_datagram(moved, ACKNOWLEDGEMENT.as_bytes());
        engine.tick().await;
        assert_eq!(engine.peer(), Some(moved));

        // Next status goes to the new source
        engine
            .transport_mut()
            .push_datagram(moved, ACKNOWLEDGEMENT.as_bytes());
        engine.tick().await;
        assert_eq!(engine.transport().last_sent().unwrap().peer, moved);
    }

    #[tokio::test]
    async fn test_server_send_failure_demotes_and_discards_peer() {
        let gate = Gate::new();
        let mut engine = streaming_server(&gate).await;
        engine
            .transport_mut()
            .set_send_error(TransportError::Send {
                errno: EHOSTUNREACH,
            });

        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        assert_eq!(engine.peer(), None);
        assert_eq!(engine.stats().send_failures, 1);
        assert_eq!(engine.stats().demotions, 1);
    }

    #[tokio::test]
    async fn test_server_ack_timeout_demotes_then_waits_for_new_peer() {
        let gate = Gate::new();
        let mut engine = streaming_server(&gate).await;

        // Status goes out, no acknowledgement comes back
        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        assert_eq!(engine.peer(), None);
        assert_eq!(engine.stats().recv_timeouts, 1);
        let sends = engine.transport().send_calls;

        // Back to a receive-only wait for a new first packet
        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        assert_eq!(engine.transport().send_calls, sends);

        let newcomer = PeerAddress::new([192, 168, 4, 3], 40_000);
        engine
            .transport_mut()
            .push_datagram(newcomer, ANNOUNCEMENT.as_bytes());
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);
        assert_eq!(engine.peer(), Some(newcomer));
    }

    #[tokio::test]
    async fn test_client_announces_then_streams() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = client(&gate);

        engine.tick().await;
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);
        assert_eq!(engine.peer(), Some(SERVER));

        let sent = engine.transport().last_sent().unwrap();
        assert_eq!(sent.peer, SERVER);
        assert_eq!(sent.text(), ANNOUNCEMENT);
    }

    #[tokio::test]
    async fn test_client_announce_retries_without_bound() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = client(&gate);
        engine.tick().await;

        engine
            .transport_mut()
            .set_send_error(TransportError::Send {
                errno: EHOSTUNREACH,
            });
        for _ in 0..20 {
            assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        }
        assert_eq!(engine.stats().send_failures, 20);

        engine.transport_mut().clear_send_error();
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);
    }

    #[tokio::test]
    async fn test_client_acknowledges_status() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = client(&gate);
        engine.tick().await;
        engine.tick().await;

        engine
            .transport_mut()
            .push_datagram(SERVER, REFERENCE_STATUS.as_bytes());
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);

        assert_eq!(engine.last_received(), REFERENCE_STATUS);
        let sent = engine.transport().last_sent().unwrap();
        assert_eq!(sent.peer, SERVER);
        assert_eq!(sent.text(), ACKNOWLEDGEMENT);
    }

    #[tokio::test]
    async fn test_client_status_timeout_demotes_and_reannounces() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = client(&gate);
        engine.tick().await;
        engine.tick().await;

        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        assert_eq!(engine.peer(), None);

        engine.transport_mut().clear_sent();
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);
        assert_eq!(engine.transport().last_sent().unwrap().text(), ANNOUNCEMENT);
    }

    #[tokio::test]
    async fn test_client_ack_failure_demotes() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = client(&gate);
        engine.tick().await;
        engine.tick().await;

        engine
            .transport_mut()
            .push_datagram(SERVER, REFERENCE_STATUS.as_bytes());
        engine
            .transport_mut()
            .set_send_error(TransportError::Send { errno: 9 });
        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        assert_eq!(engine.stats().demotions, 1);
    }

    #[tokio::test]
    async fn test_link_down_discards_peer() {
        let gate = Gate::new();
        let mut engine = streaming_server(&gate).await;

        link_down(&gate);
        assert_eq!(engine.tick().await, ExchangePhase::AwaitingLink);
        assert_eq!(engine.peer(), None);
        assert_eq!(engine.stats().link_losses, 1);

        // Recovers through AwaitingPeer once the link returns
        link_up(&gate);
        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
    }

    #[tokio::test]
    async fn test_repeated_link_up_is_idempotent() {
        let gate = Gate::new();
        let mut engine = streaming_server(&gate).await;
        let sends = engine.transport().send_calls;

        assert!(!gate.on_link_event(LinkEvent::Associated { peer: MAC }));
        assert!(!gate.on_link_event(LinkEvent::Associated { peer: MAC }));

        engine
            .transport_mut()
            .push_datagram(CLIENT, ACKNOWLEDGEMENT.as_bytes());
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);
        assert_eq!(engine.transport().send_calls, sends + 1);
        assert_eq!(engine.transport().sent_count(), 1);
        assert_eq!(engine.stats().demotions, 0);
        assert_eq!(engine.stats().link_losses, 0);
    }

    #[tokio::test]
    async fn test_receive_length_boundary() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = server(&gate);
        engine.tick().await;

        engine
            .transport_mut()
            .push_datagram(CLIENT, &[b'a'; MAX_DATAGRAM_LEN]);
        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        assert_eq!(engine.stats().recv_failures, 1);

        engine
            .transport_mut()
            .push_datagram(CLIENT, &[b'a'; MAX_PAYLOAD_LEN]);
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);
        assert_eq!(engine.last_received().len(), MAX_PAYLOAD_LEN);
    }

    #[tokio::test]
    async fn test_full_length_text_with_nul_terminator_accepted() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = server(&gate);
        engine.tick().await;

        let mut datagram = [b'a'; MAX_DATAGRAM_LEN];
        datagram[MAX_PAYLOAD_LEN] = 0;
        engine.transport_mut().push_datagram(CLIENT, &datagram);

        assert_eq!(engine.tick().await, ExchangePhase::Streaming);
        assert_eq!(engine.peer(), Some(CLIENT));
        assert_eq!(engine.last_received().len(), MAX_PAYLOAD_LEN);
        assert_eq!(engine.stats().recv_failures, 0);
    }

    #[tokio::test]
    async fn test_datagram_longer_than_bound_rejected() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = server(&gate);
        engine.tick().await;

        engine
            .transport_mut()
            .push_datagram(CLIENT, &[b'a'; MAX_DATAGRAM_LEN + 8]);
        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        assert_eq!(engine.stats().recv_failures, 1);
        assert_eq!(engine.peer(), None);
    }

    #[tokio::test]
    async fn test_client_receive_failure_demotes_and_discards_peer() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = client(&gate);
        engine.tick().await;
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);
        assert_eq!(engine.peer(), Some(SERVER));

        engine
            .transport_mut()
            .push_recv_error(TransportError::Recv { errno: EBADF });
        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        assert_eq!(engine.peer(), None);
        assert_eq!(engine.stats().recv_failures, 1);
        assert_eq!(engine.stats().demotions, 1);
        assert_eq!(engine.transport().pending_inbound(), 0);
    }

    #[tokio::test]
    async fn test_server_receive_failure_keeps_waiting() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = server(&gate);
        engine.tick().await;

        engine
            .transport_mut()
            .push_recv_error(TransportError::Recv { errno: EBADF });
        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        assert_eq!(engine.stats().recv_failures, 1);
        assert_eq!(engine.stats().demotions, 0);
        assert_eq!(engine.transport().send_calls, 0);
        assert_eq!(engine.transport().pending_inbound(), 0);

        // Next greeting is still taken
        engine
            .transport_mut()
            .push_datagram(CLIENT, ANNOUNCEMENT.as_bytes());
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);
    }

    #[tokio::test]
    async fn test_receive_rejects_non_ascii_and_accepts_nul_terminator() {
        let gate = Gate::new();
        link_up(&gate);
        let mut engine = server(&gate);
        engine.tick().await;

        engine
            .transport_mut()
            .push_datagram(CLIENT, &[b'h', b'i', 0xFF]);
        assert_eq!(engine.tick().await, ExchangePhase::AwaitingPeer);
        assert_eq!(engine.stats().recv_failures, 1);

        engine
            .transport_mut()
            .push_datagram(CLIENT, b"Connected to UDP Client\0");
        assert_eq!(engine.tick().await, ExchangePhase::Streaming);
        assert_eq!(engine.last_received(), ANNOUNCEMENT);
    }

    #[tokio::test]
    async fn test_phase_needs_link_for_any_event_sequence() {
        let gate = Gate::new();
        let mut engine = client(&gate);

        // Deterministic pseudo-random link flaps
        let mut seed: u32 = 0x1234_5678;
        for _ in 0..200 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            match seed >> 29 {
                0 | 1 => link_down(&gate),
                2 | 3 | 4 => link_up(&gate),
                _ => {}
            }
            if seed & 0x100 != 0 {
                engine
                    .transport_mut()
                    .push_datagram(SERVER, REFERENCE_STATUS.as_bytes());
            }

            let _ = tokio::time::timeout(Duration::from_millis(1), engine.tick()).await;

            if engine.phase().needs_link() {
                assert!(gate.is_up(), "{:?} while link down", engine.phase());
            }
        }
    }
}
