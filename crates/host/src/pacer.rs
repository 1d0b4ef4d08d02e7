//! Tokio pacer

use std::time::Duration;

use pico_link::exchange::Pacer;

/// [`Pacer`] backed by `tokio::time::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    async fn pause(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
