//! Host UDP client: announce to the server, then acknowledge every status.
//!
//! Usage: cargo run -p pico_link_host --bin udp_client -- --server 192.168.4.1

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use clap::Parser;

use pico_link::exchange::{ExchangeConfig, Role};
use pico_link_core::exchange::EXCHANGE_UDP_PORT;
use pico_link_core::PeerAddress;
use pico_link_host::HostError;

#[derive(Parser)]
#[command(name = "udp_client", about = "pico_link UDP status client")]
struct Cli {
    /// Server address
    #[arg(short, long, default_value = "192.168.4.1")]
    server: Ipv4Addr,

    /// UDP port (server and local)
    #[arg(short, long, default_value_t = EXCHANGE_UDP_PORT)]
    port: u16,

    /// Local address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: Ipv4Addr,

    /// Local port (defaults to --port)
    #[arg(long)]
    local_port: Option<u16>,

    /// Seconds to wait for a status report
    #[arg(long, default_value_t = 10)]
    reply_timeout: u64,

    /// Milliseconds between exchange ticks
    #[arg(long, default_value_t = 500)]
    tick_ms: u64,
}

async fn run(cli: Cli) -> Result<(), HostError> {
    let server = PeerAddress::new(cli.server.octets(), cli.port);
    let bind = SocketAddrV4::new(cli.bind, cli.local_port.unwrap_or(cli.port));
    let config = ExchangeConfig::default()
        .with_reply_timeout(Duration::from_secs(cli.reply_timeout))
        .with_tick_interval(Duration::from_millis(cli.tick_ms));

    pico_link_host::runtime::run(Role::Client { server }, bind, config).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    pico_link_host::logging::init();

    if let Err(e) = run(cli).await {
        tracing::error!("udp_client failed: {e}");
        std::process::exit(1);
    }
}
