//! Exchange protocol types
//!
//! The exchange runs over UDP once the link is up. Both roles walk the same
//! phases with inverted initiative:
//!
//! ```text
//!                 link up                 first datagram exchanged
//! AwaitingLink ───────────▶ AwaitingPeer ─────────────────────────▶ Streaming
//!      ▲                         ▲                                      │
//!      │ link down (any phase)   │       send / receive failure         │
//!      └─────────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! The state machine itself lives in the runtime crate; this module holds the
//! phase and role types, the wire messages and the timing constants.

pub mod config;
pub mod message;
pub mod phase;

pub use config::ExchangeConfig;
pub use message::{
    payload_text, MessageError, StatusReport, ACKNOWLEDGEMENT, ANNOUNCEMENT, EXCHANGE_UDP_PORT,
    MAX_DATAGRAM_LEN, MAX_PAYLOAD_LEN,
};
pub use phase::{ExchangePhase, Role};
