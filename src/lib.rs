#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! pico_link - AP/STA link lifecycle and UDP status exchange
//!
//! One board runs a WPA2 soft access point and streams a status report to
//! the station that joins it; the station acknowledges every report. This
//! crate holds the protocol runtime (link gate, datagram transport, exchange
//! engine, scheduler) and, behind the `pico2_w` feature, the RP2350 + CYW43439
//! platform that drives it.

// Logging macros (log_info!, log_warn!, ...)
pub mod logging;

// Build-time link settings
pub mod config;

// Link readiness shared between the radio and the engine
pub mod link;

// Datagram transport abstraction
pub mod transport;

// Exchange state machine and scheduler
pub mod exchange;

// Hardware platform (Pico 2 W)
#[cfg(feature = "pico2_w")]
pub mod platform;

pub use pico_link_core as protocol;
