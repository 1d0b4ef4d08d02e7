//! Station event policy and reconnect budget
//!
//! A station considers its link up once it holds an IPv4 lease from the AP,
//! not merely when the 802.11 association completes: datagrams cannot be
//! addressed before that point.
//!
//! After a disconnect the supervisor asks the radio to reconnect up to
//! [`MAX_RECONNECT_ATTEMPTS`] times in a row. Obtaining an address resets the
//! budget. Once the budget is spent the supervisor stops asking and the link
//! stays down until the radio is restarted.
//!
//! ```text
//! Started ──────────────▶ reconnect
//! Associated(bssid) ────▶ remember bssid
//! GotIp(ip) ────────────▶ link Up, budget reset
//! Disconnected ─────────▶ link Down, reconnect while budget remains
//! ```

use super::{HardwareAddr, LinkEvent};

/// Consecutive reconnect attempts allowed after a disconnect
pub const MAX_RECONNECT_ATTEMPTS: u8 = 5;

/// Native events reported by a station radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationEvent {
    /// Station interface started
    Started,
    /// 802.11 association completed with the given AP
    Associated { bssid: HardwareAddr },
    /// Association lost or a connect attempt failed
    Disconnected,
    /// IPv4 lease obtained
    GotIp { ip: [u8; 4] },
}

/// What the radio driver should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StationAction {
    /// Link event to forward to the link gate
    pub link: Option<LinkEvent>,
    /// Issue a (re)connect request to the radio
    pub reconnect: bool,
}

/// Translates station events into link events and reconnect requests
#[derive(Debug, Clone, Default)]
pub struct StationSupervisor {
    attempts: u8,
    bssid: HardwareAddr,
    ip: Option<[u8; 4]>,
}

impl StationSupervisor {
    /// Create a supervisor with a full reconnect budget
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one station event
    pub fn on_event(&mut self, event: StationEvent) -> StationAction {
        match event {
            StationEvent::Started => StationAction {
                link: None,
                reconnect: true,
            },
            StationEvent::Associated { bssid } => {
                self.bssid = bssid;
                StationAction::default()
            }
            StationEvent::GotIp { ip } => {
                self.attempts = 0;
                self.ip = Some(ip);
                StationAction {
                    link: Some(LinkEvent::Associated { peer: self.bssid }),
                    reconnect: false,
                }
            }
            StationEvent::Disconnected => {
                self.ip = None;
                let reconnect = self.attempts < MAX_RECONNECT_ATTEMPTS;
                if reconnect {
                    self.attempts += 1;
                }
                StationAction {
                    link: Some(LinkEvent::Disassociated { peer: self.bssid }),
                    reconnect,
                }
            }
        }
    }

    /// Reconnect attempts made since the last lease
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    /// True once the reconnect budget is spent
    pub fn is_exhausted(&self) -> bool {
        self.attempts >= MAX_RECONNECT_ATTEMPTS
    }

    /// Address of the current lease, if any
    pub fn ip(&self) -> Option<[u8; 4]> {
        self.ip
    }

    /// Refill the reconnect budget (e.g. after a manual radio restart)
    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}
