//! pico_link_core - Pure no_std protocol types for the pico_link AP/STA exchange
//!
//! This crate contains platform-agnostic types and policies that can be
//! tested on host without any feature flags or embassy dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **No I/O**: Sockets, timers and radios are injected by the runtime crate
//!
//! # Modules
//!
//! - [`link`]: Link state, link-layer events and the AP/STA event policies
//! - [`exchange`]: Exchange phases, roles, wire messages and timing config
//! - [`radio`]: Radio settings reported in the status message
//! - [`addr`]: IPv4 peer addresses

#![no_std]

pub mod addr;
pub mod exchange;
pub mod link;
pub mod radio;

pub use addr::PeerAddress;
pub use exchange::{ExchangeConfig, ExchangePhase, Role};
pub use link::{HardwareAddr, LinkEvent, LinkState};
