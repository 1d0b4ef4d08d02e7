//! Exchange Tasks (RP2350 Platform)
//!
//! One task per role. Each waits for the radio task to hand over the network
//! stack, binds the UDP socket and runs the exchange scheduler forever. A bind
//! failure is fatal: the task logs it and ends.

use embassy_net::udp::PacketMetadata;
use pico_link_core::exchange::{ExchangeConfig, Role};

use crate::config::LinkParams;
use crate::exchange::scheduler::EmbassyPacer;
use crate::exchange::{ExchangeEngine, Scheduler};
use crate::platform::rp2350::network::{wait_network_ready, DeviceLinkGate};
use crate::platform::rp2350::transport::udp::{SOCKET_BUFFER_LEN, SOCKET_META_SLOTS};
use crate::platform::rp2350::transport::EmbassyUdpTransport;

/// Access point side: wait for a greeting, then stream status reports
#[embassy_executor::task]
pub async fn udp_server_task(
    gate: &'static DeviceLinkGate,
    params: LinkParams,
    config: ExchangeConfig,
) {
    let role = Role::Server {
        status: params.status_report(),
    };
    run_exchange(role, params.port, gate, config).await
}

/// Station side: announce, then acknowledge every status report
#[embassy_executor::task]
pub async fn udp_client_task(
    gate: &'static DeviceLinkGate,
    params: LinkParams,
    config: ExchangeConfig,
) {
    let role = Role::Client {
        server: params.server_address(),
    };
    run_exchange(role, params.port, gate, config).await
}

async fn run_exchange(
    role: Role,
    port: u16,
    gate: &'static DeviceLinkGate,
    config: ExchangeConfig,
) {
    crate::log_info!("UDP {} task started", role.name());
    let stack = wait_network_ready().await;

    let mut rx_meta = [PacketMetadata::EMPTY; SOCKET_META_SLOTS];
    let mut rx_buffer = [0u8; SOCKET_BUFFER_LEN];
    let mut tx_meta = [PacketMetadata::EMPTY; SOCKET_META_SLOTS];
    let mut tx_buffer = [0u8; SOCKET_BUFFER_LEN];

    let transport = match EmbassyUdpTransport::bind(
        stack,
        port,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    ) {
        Ok(transport) => transport,
        Err(e) => {
            crate::log_error!("UDP {} task stopped: {}", role.name(), e.as_str());
            return;
        }
    };

    let mut engine = ExchangeEngine::new(role, transport, gate, config);
    let mut scheduler = Scheduler::new(EmbassyPacer, config.tick_interval);
    scheduler.run(&mut engine).await
}
