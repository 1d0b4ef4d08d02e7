//! Access point event policy
//!
//! On the AP side the link is "up" while a station is associated. The AP
//! start notification carries the interface addressing for logging and does
//! not change the link state.

use super::{HardwareAddr, LinkEvent};

/// Native events reported by an access point radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPointEvent {
    /// Soft-AP interface is running
    Started {
        ip: [u8; 4],
        netmask: [u8; 4],
        gateway: [u8; 4],
    },
    /// A station associated with the AP
    StationConnected { mac: HardwareAddr },
    /// A station left the AP
    StationDisconnected { mac: HardwareAddr },
}

impl AccessPointEvent {
    /// Link event implied by this AP event, if any
    pub fn link_event(&self) -> Option<LinkEvent> {
        match *self {
            AccessPointEvent::Started { .. } => None,
            AccessPointEvent::StationConnected { mac } => {
                Some(LinkEvent::Associated { peer: mac })
            }
            AccessPointEvent::StationDisconnected { mac } => {
                Some(LinkEvent::Disassociated { peer: mac })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::LinkState;

    const MAC: HardwareAddr = HardwareAddr([0x02, 0x11, 0x22, 0x33, 0x44, 0x55]);

    #[test]
    fn test_started_has_no_link_event() {
        let event = AccessPointEvent::Started {
            ip: [192, 168, 4, 1],
            netmask: [255, 255, 255, 0],
            gateway: [192, 168, 4, 1],
        };
        assert_eq!(event.link_event(), None);
    }

    #[test]
    fn test_station_connected_brings_link_up() {
        let event = AccessPointEvent::StationConnected { mac: MAC };
        let link = event.link_event().unwrap();
        assert_eq!(link.state(), LinkState::Up);
        assert_eq!(link.peer(), MAC);
    }

    #[test]
    fn test_station_disconnected_brings_link_down() {
        let event = AccessPointEvent::StationDisconnected { mac: MAC };
        assert_eq!(event.link_event().unwrap().state(), LinkState::Down);
    }
}
