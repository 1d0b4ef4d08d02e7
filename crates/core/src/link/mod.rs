//! Link-layer state and events
//!
//! The protocol only cares about one bit of link-layer information: whether the
//! 802.11 association is currently up. Radio drivers report association changes
//! as [`LinkEvent`]s; the runtime's link gate folds them into a [`LinkState`].
//!
//! The two radio roles speak different event vocabularies, so each has a small
//! policy that translates its native events into link events:
//!
//! - [`access_point`]: station connected / disconnected notifications
//! - [`station`]: start, disconnect and got-IP notifications, plus the
//!   reconnect budget applied after a disconnect

pub mod access_point;
pub mod station;

use core::fmt;

pub use access_point::AccessPointEvent;
pub use station::{StationAction, StationEvent, StationSupervisor, MAX_RECONNECT_ATTEMPTS};

/// Current state of the wireless association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    /// No association; protocol progress is suspended
    #[default]
    Down,
    /// Associated; datagrams can flow
    Up,
}

impl LinkState {
    /// Returns true when the link is up
    pub fn is_up(self) -> bool {
        matches!(self, LinkState::Up)
    }

    /// Return variant name as a static string (usable with defmt on embedded)
    pub fn as_str(self) -> &'static str {
        match self {
            LinkState::Down => "Down",
            LinkState::Up => "Up",
        }
    }
}

/// 802.11 hardware (MAC) address of the associated counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HardwareAddr(pub [u8; 6]);

impl fmt::Display for HardwareAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

/// Association change reported by the link layer
///
/// Both variants carry the counterpart's hardware address. It is logged but
/// plays no part in protocol decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// Association established
    Associated { peer: HardwareAddr },
    /// Association lost
    Disassociated { peer: HardwareAddr },
}

impl LinkEvent {
    /// Link state implied by this event
    pub fn state(&self) -> LinkState {
        match self {
            LinkEvent::Associated { .. } => LinkState::Up,
            LinkEvent::Disassociated { .. } => LinkState::Down,
        }
    }

    /// Hardware address carried by the event
    pub fn peer(&self) -> HardwareAddr {
        match self {
            LinkEvent::Associated { peer } | LinkEvent::Disassociated { peer } => *peer,
        }
    }
}
