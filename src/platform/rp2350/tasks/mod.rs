//! RP2350 Platform Embassy Tasks
//!
//! Tasks that need the embassy runtime and the `pico2_w` feature.
//!
//! ## Available Tasks
//!
//! - `udp_server_task` - access point side of the exchange
//! - `udp_client_task` - station side of the exchange
//!
//! The radio tasks live in [`super::network`].

pub mod exchange;

pub use exchange::{udp_client_task, udp_server_task};
