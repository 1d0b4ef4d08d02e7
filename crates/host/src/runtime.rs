//! Host exchange runtime
//!
//! Bind, raise the link, then tick the engine until Ctrl-C.

use std::net::SocketAddrV4;

use pico_link::exchange::{ExchangeConfig, ExchangeEngine, Role, Scheduler};

use crate::{HostError, HostLink, TokioPacer, TokioUdpTransport};

/// Run one role on `bind` until interrupted
///
/// # Errors
///
/// Returns an error if the socket cannot be bound or the signal handler
/// cannot be installed.
pub async fn run(role: Role, bind: SocketAddrV4, config: ExchangeConfig) -> Result<(), HostError> {
    tracing::info!("UDP {} starting on {bind}", role.name());

    let transport = TokioUdpTransport::bind(bind).await?;
    let link = HostLink::new();
    link.raise();

    let mut engine = ExchangeEngine::new(role, transport, link.gate(), config);
    let mut scheduler = Scheduler::new(TokioPacer, config.tick_interval);

    tokio::select! {
        _ = scheduler.run(&mut engine) => {}
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("received SIGINT, shutting down");
        }
    }

    link.drop_link();
    let stats = engine.stats();
    tracing::info!(
        ticks = scheduler.ticks(),
        sent = stats.datagrams_sent,
        received = stats.datagrams_received,
        demotions = stats.demotions,
        "UDP {} stopped",
        role.name()
    );
    Ok(())
}
