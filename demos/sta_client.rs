//! Station + UDP Client
//!
//! Joins the `ap_server` access point, announces itself on UDP port 3333 and
//! acknowledges every status report.
//!
//! # Configuration
//!
//! Use the same `LINK_SSID` / `LINK_PASSWORD` as the access point. The station
//! address defaults to 192.168.4.2 (`LINK_STA_IP`) and the server to
//! 192.168.4.1 (`LINK_SERVER_IP`).
//!
//! # Usage
//!
//! ```bash
//! cargo build --release --example sta_client --features pico2_w \
//!     --target thumbv8m.main-none-eabihf
//! probe-rs run --chip RP2350 target/thumbv8m.main-none-eabihf/release/examples/sta_client
//! ```

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pico_link::config::LinkParams;
use pico_link::exchange::ExchangeConfig;
use pico_link::platform::rp2350::{station_task, udp_client_task, DeviceLinkGate, RadioPeripherals};

static LINK_GATE: StaticCell<DeviceLinkGate> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("pico_link STA + UDP client");
    info!("==========================");

    let p = hal::init(Default::default());

    let params = LinkParams::from_build_env();
    info!("  SSID: {}", params.ssid.as_str());
    info!(
        "  Server: {}.{}.{}.{}:{}",
        params.server_ip[0],
        params.server_ip[1],
        params.server_ip[2],
        params.server_ip[3],
        params.port
    );

    let gate: &'static DeviceLinkGate = LINK_GATE.init(DeviceLinkGate::new());

    let radio = RadioPeripherals {
        pwr: p.PIN_23,
        dio: p.PIN_24,
        cs: p.PIN_25,
        clk: p.PIN_29,
        pio: p.PIO0,
        dma: p.DMA_CH0,
    };

    spawner.spawn(station_task(spawner, params.clone(), gate, radio).unwrap());
    spawner.spawn(udp_client_task(gate, params, ExchangeConfig::default()).unwrap());
}
