//! Host runtime for pico_link
//!
//! Runs the same exchange engine as the Pico 2 W over the host network:
//! a tokio UDP socket stands in for the embassy-net socket, `tokio::time`
//! paces the scheduler and the link gate is raised as soon as the socket is
//! bound, since the host is already on a network.

pub mod error;
pub mod link;
pub mod logging;
pub mod pacer;
pub mod runtime;
pub mod transport;

pub use error::HostError;
pub use link::{HostLink, HostLinkGate};
pub use pacer::TokioPacer;
pub use transport::TokioUdpTransport;
