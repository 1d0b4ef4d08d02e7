//! Exchange runtime
//!
//! - [`engine`]: the per-role protocol state machine
//! - [`scheduler`]: paces the engine at a fixed cadence in one task
//! - [`stats`]: datagram and recovery counters

pub mod engine;
pub mod scheduler;
pub mod stats;

pub use engine::ExchangeEngine;
pub use pico_link_core::exchange::{ExchangeConfig, ExchangePhase, Role};
pub use scheduler::{Pacer, Scheduler};
pub use stats::ExchangeStats;
