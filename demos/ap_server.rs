//! Access Point + UDP Server
//!
//! Runs a soft access point on the Pico 2 W and streams a status report to
//! the station that greets it on UDP port 3333.
//!
//! # Configuration
//!
//! Link settings are baked in at build time (see `build.rs`):
//!
//! ```bash
//! LINK_SSID=PICO_LINK_AP LINK_PASSWORD=secret123 LINK_CHANNEL=11 \
//!     cargo build --release --example ap_server --features pico2_w \
//!     --target thumbv8m.main-none-eabihf
//! ```
//!
//! # Usage
//!
//! ```bash
//! probe-rs run --chip RP2350 target/thumbv8m.main-none-eabihf/release/examples/ap_server
//! ```
//!
//! # Testing
//!
//! 1. Flash `sta_client` on a second board (or run `udp_client` on a laptop
//!    joined to the AP)
//! 2. Verify "Greeting from ..." followed by one status per 500 ms

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pico_link::config::LinkParams;
use pico_link::exchange::ExchangeConfig;
use pico_link::platform::rp2350::{
    access_point_task, udp_server_task, DeviceLinkGate, RadioPeripherals,
};

static LINK_GATE: StaticCell<DeviceLinkGate> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("pico_link AP + UDP server");
    info!("=========================");

    let p = hal::init(Default::default());

    let params = LinkParams::from_build_env();
    info!("  SSID: {}", params.ssid.as_str());
    info!("  Channel: {}", params.radio.channel);
    info!("  Port: {}", params.port);

    let gate: &'static DeviceLinkGate = LINK_GATE.init(DeviceLinkGate::new());

    let radio = RadioPeripherals {
        pwr: p.PIN_23,
        dio: p.PIN_24,
        cs: p.PIN_25,
        clk: p.PIN_29,
        pio: p.PIO0,
        dma: p.DMA_CH0,
    };

    spawner.spawn(access_point_task(spawner, params.clone(), gate, radio).unwrap());
    spawner.spawn(udp_server_task(gate, params, ExchangeConfig::default()).unwrap());
}
