//! Link readiness
//!
//! The radio side (event callbacks, link monitor) feeds [`LinkEvent`]s into a
//! [`LinkGate`]; the exchange engine reads the coalesced state on every tick
//! and parks on it while the link is down.

pub mod gate;

pub use gate::LinkGate;
pub use pico_link_core::link::{
    AccessPointEvent, HardwareAddr, LinkEvent, LinkState, StationAction, StationEvent,
    StationSupervisor,
};
