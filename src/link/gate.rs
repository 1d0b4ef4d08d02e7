//! Link gate
//!
//! Shared up/down flag plus a wake signal. Link flaps are not queued: the gate
//! only remembers the latest observed state, and a task parked in
//! [`LinkGate::wait_until_up`] re-checks the flag after every wake.
//!
//! The gate is const-constructible so the device can keep it in a
//! `StaticCell`; host code owns it on the stack or in an `Arc`.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

use super::{LinkEvent, LinkState};

/// Coalesced link state with a wake-up for a waiting consumer
pub struct LinkGate<M: RawMutex> {
    up: AtomicBool,
    changed: Signal<M, ()>,
}

impl<M: RawMutex> LinkGate<M> {
    /// Create a gate in the Down state
    pub const fn new() -> Self {
        Self {
            up: AtomicBool::new(false),
            changed: Signal::new(),
        }
    }

    /// Apply a link-layer event.
    ///
    /// Returns true if the state changed. A repeated event for the current
    /// state is ignored and wakes nobody.
    pub fn on_link_event(&self, event: LinkEvent) -> bool {
        let up = event.state().is_up();
        let was_up = self.up.swap(up, Ordering::AcqRel);
        if was_up == up {
            return false;
        }

        let mac = event.peer().0;
        crate::log_info!(
            "Link {} (peer {:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x})",
            event.state().as_str(),
            mac[0],
            mac[1],
            mac[2],
            mac[3],
            mac[4],
            mac[5]
        );

        self.changed.signal(());
        true
    }

    /// Current state (non-blocking)
    pub fn state(&self) -> LinkState {
        if self.is_up() {
            LinkState::Up
        } else {
            LinkState::Down
        }
    }

    /// True while the link is up
    pub fn is_up(&self) -> bool {
        self.up.load(Ordering::Acquire)
    }

    /// Suspend until the link is up; returns immediately if it already is
    pub async fn wait_until_up(&self) {
        loop {
            if self.is_up() {
                return;
            }
            self.changed.wait().await;
        }
    }
}

impl<M: RawMutex> Default for LinkGate<M> {
    fn default() -> Self {
        Self::new()
    }
}
