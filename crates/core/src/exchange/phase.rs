//! Exchange phases and roles

use crate::addr::PeerAddress;

use super::message::StatusReport;

/// Protocol phase of an exchange engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangePhase {
    /// Link is down; waiting for association
    #[default]
    AwaitingLink,
    /// Link is up; no correspondent confirmed yet
    AwaitingPeer,
    /// Periodic status/ack exchange with a confirmed peer
    Streaming,
}

impl ExchangePhase {
    /// Return variant name as a static string (usable with defmt on embedded)
    pub fn as_str(self) -> &'static str {
        match self {
            ExchangePhase::AwaitingLink => "AwaitingLink",
            ExchangePhase::AwaitingPeer => "AwaitingPeer",
            ExchangePhase::Streaming => "Streaming",
        }
    }

    /// True in the phases that require the link to be up
    pub fn needs_link(self) -> bool {
        !matches!(self, ExchangePhase::AwaitingLink)
    }
}

/// Which side of the exchange an engine plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Access point side: waits for a greeting, then streams status reports
    Server {
        /// Status reported to the client on every streaming tick
        status: StatusReport,
    },
    /// Station side: announces itself, then acknowledges each status report
    Client {
        /// Fixed address of the server
        server: PeerAddress,
    },
}

impl Role {
    /// Short role name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Role::Server { .. } => "server",
            Role::Client { .. } => "client",
        }
    }

    /// True for the server role
    pub fn is_server(&self) -> bool {
        matches!(self, Role::Server { .. })
    }
}
