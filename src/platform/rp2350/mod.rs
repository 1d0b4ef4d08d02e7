//! RP2350 platform implementation for Raspberry Pi Pico 2 W
//!
//! CYW43439 radio bring-up, the embassy-net UDP transport and the embassy
//! tasks that run the exchange.
//!
//! # Feature Gate
//!
//! This module is only available when the `pico2_w` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! pico_link = { version = "0.1", features = ["pico2_w"] }
//! ```

pub mod network;
pub mod tasks;
pub mod transport;

pub use network::{
    access_point_task, station_task, wait_network_ready, DeviceLinkGate, RadioPeripherals,
};
pub use tasks::{udp_client_task, udp_server_task};
pub use transport::EmbassyUdpTransport;
