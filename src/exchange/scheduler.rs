//! Exchange scheduler
//!
//! Drives one engine at a fixed cadence: every tick is followed by a pause,
//! including ticks that failed, so retries in AwaitingPeer never spin.

use core::time::Duration;

use embassy_sync::blocking_mutex::raw::RawMutex;

use super::{ExchangeEngine, ExchangePhase};
use crate::transport::DatagramTransport;

/// Delay source between ticks
#[allow(async_fn_in_trait)]
pub trait Pacer {
    /// Suspend the calling task for `duration`
    async fn pause(&mut self, duration: Duration);
}

/// Fixed-cadence driver for an [`ExchangeEngine`]
pub struct Scheduler<P: Pacer> {
    pacer: P,
    interval: Duration,
    ticks: u64,
}

impl<P: Pacer> Scheduler<P> {
    /// Create a scheduler pausing `interval` after every tick
    pub fn new(pacer: P, interval: Duration) -> Self {
        Self {
            pacer,
            interval,
            ticks: 0,
        }
    }

    /// One engine tick followed by one pause
    pub async fn step<T, M>(&mut self, engine: &mut ExchangeEngine<'_, T, M>) -> ExchangePhase
    where
        T: DatagramTransport,
        M: RawMutex,
    {
        let phase = engine.tick().await;
        self.ticks = self.ticks.wrapping_add(1);
        self.pacer.pause(self.interval).await;
        phase
    }

    /// Step forever
    pub async fn run<T, M>(&mut self, engine: &mut ExchangeEngine<'_, T, M>) -> !
    where
        T: DatagramTransport,
        M: RawMutex,
    {
        crate::log_info!(
            "Exchange scheduler started ({} role, {} ms cadence)",
            engine.role().name(),
            self.interval.as_millis() as u64
        );
        loop {
            self.step(engine).await;
        }
    }

    /// Ticks completed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Pause inserted after every tick
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Underlying pacer
    pub fn pacer(&self) -> &P {
        &self.pacer
    }
}

/// Pacer backed by the embassy timer
#[cfg(feature = "pico2_w")]
pub struct EmbassyPacer;

#[cfg(feature = "pico2_w")]
impl Pacer for EmbassyPacer {
    async fn pause(&mut self, duration: Duration) {
        embassy_time::Timer::after(embassy_time::Duration::from_micros(
            duration.as_micros() as u64
        ))
        .await;
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    //! Recording pacer for testing

    use super::Pacer;
    use core::time::Duration;

    /// Pacer that returns immediately and records requested pauses
    #[derive(Debug, Default)]
    pub struct MockPacer {
        /// Number of pauses requested
        pub pauses: usize,
        /// Sum of requested pause durations
        pub total: Duration,
        /// Most recent pause duration
        pub last: Option<Duration>,
    }

    impl MockPacer {
        /// Create new mock pacer
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Pacer for MockPacer {
        async fn pause(&mut self, duration: Duration) {
            self.pauses += 1;
            self.total += duration;
            self.last = Some(duration);
        }
    }
}
