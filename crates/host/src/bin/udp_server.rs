//! Host UDP server: wait for a greeting, then stream the status report.
//!
//! Usage: cargo run -p pico_link_host --bin udp_server -- --port 3333

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use clap::Parser;

use pico_link::exchange::{ExchangeConfig, Role};
use pico_link_core::exchange::{StatusReport, EXCHANGE_UDP_PORT};
use pico_link_core::radio::{Bandwidth, RadioConfig};
use pico_link_host::HostError;

#[derive(Parser)]
#[command(name = "udp_server", about = "pico_link UDP status server")]
struct Cli {
    /// Local address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: Ipv4Addr,

    /// UDP port
    #[arg(short, long, default_value_t = EXCHANGE_UDP_PORT)]
    port: u16,

    /// Access point address reported in the status
    #[arg(long, default_value = "192.168.4.1")]
    ap_ip: Ipv4Addr,

    /// Channel reported in the status
    #[arg(long, default_value_t = 11)]
    channel: u8,

    /// Channel width in MHz (20 or 40)
    #[arg(long, default_value_t = 20)]
    bandwidth: u8,

    /// Transmit power reported in the status
    #[arg(long, default_value_t = 8)]
    tx_power: i8,

    /// Seconds to wait for a greeting or acknowledgement
    #[arg(long, default_value_t = 10)]
    reply_timeout: u64,

    /// Milliseconds between exchange ticks
    #[arg(long, default_value_t = 500)]
    tick_ms: u64,
}

async fn run(cli: Cli) -> Result<(), HostError> {
    let radio = RadioConfig::new(cli.channel, Bandwidth::from_mhz(cli.bandwidth)?, cli.tx_power)?;
    let status = StatusReport::from_radio(cli.ap_ip.octets(), cli.port, &radio);
    let config = ExchangeConfig::default()
        .with_reply_timeout(Duration::from_secs(cli.reply_timeout))
        .with_tick_interval(Duration::from_millis(cli.tick_ms));

    pico_link_host::runtime::run(
        Role::Server { status },
        SocketAddrV4::new(cli.bind, cli.port),
        config,
    )
    .await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    pico_link_host::logging::init();

    if let Err(e) = run(cli).await {
        tracing::error!("udp_server failed: {e}");
        std::process::exit(1);
    }
}
