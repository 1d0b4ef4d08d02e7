//! Host link driver
//!
//! A host has no 802.11 association of its own to watch: it is on a network
//! once its socket is bound. [`HostLink`] owns the shared gate and feeds it
//! the same [`LinkEvent`]s a radio would, so the engine sees an identical
//! lifecycle.

use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use pico_link::link::{HardwareAddr, LinkEvent, LinkGate, LinkState};

/// Link gate shared between the host link driver and the engine
pub type HostLinkGate = LinkGate<CriticalSectionRawMutex>;

/// Producer side of the host link gate
#[derive(Clone, Default)]
pub struct HostLink {
    gate: Arc<HostLinkGate>,
}

impl HostLink {
    /// Create a driver with the link down
    pub fn new() -> Self {
        Self {
            gate: Arc::new(HostLinkGate::new()),
        }
    }

    /// Gate handed to the engine
    pub fn gate(&self) -> &HostLinkGate {
        &self.gate
    }

    /// Report the network as reachable
    pub fn raise(&self) -> bool {
        self.gate.on_link_event(LinkEvent::Associated {
            peer: HardwareAddr::default(),
        })
    }

    /// Report the network as lost
    pub fn drop_link(&self) -> bool {
        self.gate.on_link_event(LinkEvent::Disassociated {
            peer: HardwareAddr::default(),
        })
    }

    /// Current link state
    pub fn state(&self) -> LinkState {
        self.gate.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_down() {
        let link = HostLink::new();
        assert_eq!(link.state(), LinkState::Down);
    }

    #[test]
    fn test_raise_and_drop() {
        let link = HostLink::new();
        assert!(link.raise());
        assert!(!link.raise());
        assert!(link.gate().is_up());

        assert!(link.drop_link());
        assert_eq!(link.state(), LinkState::Down);
    }

    #[test]
    fn test_clones_share_gate() {
        let link = HostLink::new();
        let other = link.clone();
        other.raise();
        assert!(link.gate().is_up());
    }
}
