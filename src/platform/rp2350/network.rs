//! RP2350 WiFi Link Bring-up
//!
//! Brings up the CYW43439 radio on a Pico 2 W in one of two roles and feeds
//! association changes into the [`LinkGate`] shared with the exchange task.
//!
//! # Access Point Flow
//!
//! ```text
//! 1. Initialize CYW43439 driver (PIO, DMA, firmware, CLM)
//! 2. Create embassy-net stack with the static AP address (/24)
//! 3. Start the soft-AP (WPA2 when a password is set, open otherwise)
//! 4. Hand the stack to the exchange task
//! 5. Forward link up/down transitions to the gate as AP events
//! ```
//!
//! # Station Flow
//!
//! ```text
//! 1. Initialize CYW43439 driver
//! 2. Create embassy-net stack with the static station address (/24)
//! 3. Join the AP; on success wait for the address and report GotIp
//! 4. On disconnect, rejoin while the reconnect budget lasts
//! ```
//!
//! Both entry points never return: cyw43 `Control` must stay alive in the
//! task that created it.
//!
//! # Firmware
//!
//! The CYW43439 firmware, CLM and NVRAM blobs are expected in
//! `cyw43-firmware/` at the repository root (copied from the embassy
//! repository).

use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Ipv4Address, Ipv4Cidr, Stack, StackResources, StaticConfigV4};
use embassy_rp::clocks::RoscRng;
use embassy_rp::{
    bind_interrupts,
    gpio::{Level, Output},
    peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0},
    pio::{InterruptHandler as PioInterruptHandler, Pio},
    Peri,
};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use static_cell::StaticCell;

use cyw43::{aligned_bytes, JoinOptions};
use cyw43_pio::DEFAULT_CLOCK_DIVIDER;

use pico_link_core::link::{AccessPointEvent, HardwareAddr, StationEvent, StationSupervisor};
use pico_link_core::radio::SecondaryChannel;

use crate::config::LinkParams;
use crate::link::LinkGate;

/// Link gate type used on the device
pub type DeviceLinkGate = LinkGate<CriticalSectionRawMutex>;

/// Join timeout in seconds
const JOIN_TIMEOUT_SECS: u64 = 10;

/// Address acquisition timeout after a successful join
const CONFIG_TIMEOUT_SECS: u64 = 10;

/// Delay between reconnect attempts
const RETRY_DELAY_MS: u64 = 1000;

/// Network stack handed from the radio task to the exchange task
static NETWORK_READY: Signal<CriticalSectionRawMutex, Stack<'static>> = Signal::new();

/// Wait until the radio task has brought up the network stack.
///
/// Only one task may wait: the signal hands the stack over once.
pub async fn wait_network_ready() -> Stack<'static> {
    NETWORK_READY.wait().await
}

/// Peripherals wired to the CYW43439 on the Pico 2 W
pub struct RadioPeripherals {
    /// GPIO23: WiFi power
    pub pwr: Peri<'static, PIN_23>,
    /// GPIO24: WiFi DIO
    pub dio: Peri<'static, PIN_24>,
    /// GPIO25: WiFi CS
    pub cs: Peri<'static, PIN_25>,
    /// GPIO29: WiFi CLK
    pub clk: Peri<'static, PIN_29>,
    /// PIO0 for the WiFi SPI
    pub pio: Peri<'static, PIO0>,
    /// DMA channel 0 for the WiFi SPI
    pub dma: Peri<'static, DMA_CH0>,
}

bind_interrupts!(pub struct PioIrqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Run the soft access point.
///
/// Spawn through [`access_point_task`] and use [`wait_network_ready`] to get
/// the stack.
pub async fn start_access_point(
    spawner: Spawner,
    params: LinkParams,
    gate: &'static DeviceLinkGate,
    radio: RadioPeripherals,
) -> ! {
    let net_config = static_config(params.ap_ip, None);
    let (stack, mut control) = bring_up(spawner, radio, net_config).await;

    match params.radio.secondary_channel() {
        SecondaryChannel::None => {}
        SecondaryChannel::Above | SecondaryChannel::Below => {
            crate::log_warn!("CYW43439 soft-AP runs 20 MHz; 40 MHz is reported only");
        }
    }

    crate::log_info!(
        "Starting AP \"{}\" on channel {} ({}MHz, power {})",
        params.ssid.as_str(),
        params.radio.channel,
        params.radio.bandwidth.mhz(),
        params.radio.tx_power
    );
    if params.is_secured() {
        control
            .start_ap_wpa2(params.ssid.as_str(), params.password.as_str(), params.radio.channel)
            .await;
    } else {
        control
            .start_ap_open(params.ssid.as_str(), params.radio.channel)
            .await;
    }

    log_ap_event(AccessPointEvent::Started {
        ip: params.ap_ip,
        netmask: [255, 255, 255, 0],
        gateway: params.ap_ip,
    });

    NETWORK_READY.signal(stack);

    // cyw43 does not report station association; the embassy-net link state
    // stands in for it
    loop {
        stack.wait_link_up().await;
        forward_ap_event(gate, AccessPointEvent::StationConnected {
            mac: HardwareAddr::default(),
        });

        stack.wait_link_down().await;
        forward_ap_event(gate, AccessPointEvent::StationDisconnected {
            mac: HardwareAddr::default(),
        });
    }
}

/// Join the access point as a station and keep the association alive.
///
/// Spawn through [`station_task`] and use [`wait_network_ready`] to get the
/// stack.
pub async fn join_station(
    spawner: Spawner,
    params: LinkParams,
    gate: &'static DeviceLinkGate,
    radio: RadioPeripherals,
) -> ! {
    let net_config = static_config(params.sta_ip, Some(params.ap_ip));
    let (stack, mut control) = bring_up(spawner, radio, net_config).await;

    NETWORK_READY.signal(stack);

    let mut supervisor = StationSupervisor::new();
    let mut action = supervisor.on_event(StationEvent::Started);

    loop {
        if let Some(event) = action.link {
            gate.on_link_event(event);
        }

        let event = if supervisor.ip().is_some() {
            // Associated: wait for the link to drop
            stack.wait_link_down().await;
            crate::log_warn!("Disconnected from AP");
            StationEvent::Disconnected
        } else if action.reconnect {
            crate::log_info!(
                "Joining \"{}\" (attempt {})",
                params.ssid.as_str(),
                supervisor.attempts() + 1
            );
            match join_once(&mut control, stack, &params).await {
                Some(ip) => StationEvent::GotIp { ip },
                None => {
                    // leave() resets CYW43439 internal state after a failed join
                    control.leave().await;
                    Timer::after(Duration::from_millis(RETRY_DELAY_MS)).await;
                    StationEvent::Disconnected
                }
            }
        } else {
            crate::log_error!(
                "Failed to connect to \"{}\" after {} attempts",
                params.ssid.as_str(),
                supervisor.attempts()
            );
            // Keep Control alive
            loop {
                Timer::after(Duration::from_secs(3600)).await;
            }
        };

        action = supervisor.on_event(event);
    }
}

async fn join_once(
    control: &mut cyw43::Control<'static>,
    stack: Stack<'static>,
    params: &LinkParams,
) -> Option<[u8; 4]> {
    let options = if params.is_secured() {
        JoinOptions::new(params.password.as_bytes())
    } else {
        JoinOptions::new_open()
    };

    match embassy_time::with_timeout(
        Duration::from_secs(JOIN_TIMEOUT_SECS),
        control.join(params.ssid.as_str(), options),
    )
    .await
    {
        Ok(Ok(())) => {}
        Ok(Err(_)) => {
            crate::log_warn!("Join returned an error");
            return None;
        }
        Err(_) => {
            crate::log_warn!("Join timed out after {} seconds", JOIN_TIMEOUT_SECS);
            return None;
        }
    }

    let ready = embassy_time::with_timeout(Duration::from_secs(CONFIG_TIMEOUT_SECS), async {
        stack.wait_link_up().await;
        stack.wait_config_up().await;
    })
    .await;
    if ready.is_err() {
        crate::log_warn!("No address after join");
        return None;
    }

    let ip = stack.config_v4()?.address.address().octets();
    crate::log_info!("Got IP {}.{}.{}.{}", ip[0], ip[1], ip[2], ip[3]);
    Some(ip)
}

/// CYW43439 and embassy-net bring-up shared by both roles
async fn bring_up(
    spawner: Spawner,
    radio: RadioPeripherals,
    net_config: NetConfig,
) -> (Stack<'static>, cyw43::Control<'static>) {
    let mut rng = RoscRng;

    // Firmware (aligned for DMA)
    let fw = aligned_bytes!("../../../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../../../cyw43-firmware/43439A0_clm.bin");
    let nvram = aligned_bytes!("../../../cyw43-firmware/nvram_rp2040.bin");

    let pwr = Output::new(radio.pwr, Level::Low);
    let cs = Output::new(radio.cs, Level::High);
    let mut pio = Pio::new(radio.pio, PioIrqs);
    let spi = cyw43_pio::PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        radio.dio,
        radio.clk,
        radio.dma,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw, nvram).await;
    spawner.spawn(wifi_task(runner).unwrap());

    // CLM must be loaded before any network operation
    control.init(clm).await;

    let mac = control.address().await;
    crate::log_debug!(
        "WiFi MAC address: {:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[0],
        mac[1],
        mac[2],
        mac[3],
        mac[4],
        mac[5]
    );

    control
        .set_power_management(cyw43::PowerManagementMode::None)
        .await;

    static STACK_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        net_config,
        STACK_RESOURCES.init(StackResources::new()),
        rng.next_u64(),
    );
    spawner.spawn(net_task(runner).unwrap());

    (stack, control)
}

fn static_config(ip: [u8; 4], gateway: Option<[u8; 4]>) -> NetConfig {
    crate::log_info!(
        "Configuring static IP: {}.{}.{}.{}/24",
        ip[0],
        ip[1],
        ip[2],
        ip[3]
    );
    NetConfig::ipv4_static(StaticConfigV4 {
        address: Ipv4Cidr::new(Ipv4Address::new(ip[0], ip[1], ip[2], ip[3]), 24),
        gateway: gateway.map(|g| Ipv4Address::new(g[0], g[1], g[2], g[3])),
        dns_servers: Default::default(),
    })
}

fn forward_ap_event(gate: &DeviceLinkGate, event: AccessPointEvent) {
    log_ap_event(event);
    if let Some(link) = event.link_event() {
        gate.on_link_event(link);
    }
}

fn log_ap_event(event: AccessPointEvent) {
    match event {
        AccessPointEvent::Started { ip, netmask, gateway } => crate::log_info!(
            "AP started: ip {}.{}.{}.{} netmask {}.{}.{}.{} gateway {}.{}.{}.{}",
            ip[0],
            ip[1],
            ip[2],
            ip[3],
            netmask[0],
            netmask[1],
            netmask[2],
            netmask[3],
            gateway[0],
            gateway[1],
            gateway[2],
            gateway[3]
        ),
        AccessPointEvent::StationConnected { .. } => crate::log_info!("Station joined"),
        AccessPointEvent::StationDisconnected { .. } => crate::log_info!("Station left"),
    }
}

/// Soft access point task
#[embassy_executor::task]
pub async fn access_point_task(
    spawner: Spawner,
    params: LinkParams,
    gate: &'static DeviceLinkGate,
    radio: RadioPeripherals,
) -> ! {
    start_access_point(spawner, params, gate, radio).await
}

/// Station task
#[embassy_executor::task]
pub async fn station_task(
    spawner: Spawner,
    params: LinkParams,
    gate: &'static DeviceLinkGate,
    radio: RadioPeripherals,
) -> ! {
    join_station(spawner, params, gate, radio).await
}

/// WiFi driver task
///
/// Runs the CYW43439 WiFi driver event loop.
#[embassy_executor::task]
async fn wifi_task(
    runner: cyw43::Runner<
        'static,
        cyw43::SpiBus<Output<'static>, cyw43_pio::PioSpi<'static, PIO0, 0, DMA_CH0>>,
    >,
) -> ! {
    runner.run().await
}

/// Network stack task
///
/// Runs the embassy-net network stack event loop.
#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}
