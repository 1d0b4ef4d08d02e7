//! Exchange timing configuration

use core::time::Duration;

/// Default time to wait for a reply datagram
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// Default pause between scheduler ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Timing of the exchange cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeConfig {
    /// Bound on every receive (greeting, status or acknowledgement)
    pub reply_timeout: Duration,
    /// Pause the scheduler inserts after every tick
    pub tick_interval: Duration,
}

impl ExchangeConfig {
    /// Override the reply timeout
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    /// Override the tick interval
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}
