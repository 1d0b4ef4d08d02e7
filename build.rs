use std::env;
use std::fs;
use std::path::PathBuf;

/// Build-time link settings and their reference defaults
const LINK_SETTINGS: &[(&str, &str)] = &[
    ("LINK_SSID", "PICO_LINK_AP"),
    ("LINK_PASSWORD", ""),
    ("LINK_CHANNEL", "11"),
    ("LINK_BANDWIDTH", "20"),
    ("LINK_TX_POWER", "8"),
    ("LINK_AP_IP", "192.168.4.1"),
    ("LINK_STA_IP", "192.168.4.2"),
    ("LINK_SERVER_IP", "192.168.4.1"),
    ("LINK_PORT", "3333"),
];

fn main() {
    // Forward link settings from the environment (optional); the firmware
    // falls back to the reference value when a setting fails to parse
    for (name, default) in LINK_SETTINGS {
        match env::var(name) {
            Ok(value) => {
                println!("cargo:rustc-env={}={}", name, value);
                if *name == "LINK_PASSWORD" {
                    println!("cargo:warning=Using {} from environment (hidden)", name);
                } else {
                    println!("cargo:warning=Using {} from environment: {}", name, value);
                }
            }
            Err(_) => println!("cargo:rustc-env={}={}", name, default),
        }
        println!("cargo:rerun-if-env-changed={}", name);
    }

    // Linker script for the RP2350 device build
    let target = env::var("TARGET").unwrap_or_default();
    if target.starts_with("thumbv8m") {
        let out = PathBuf::from(env::var("OUT_DIR").unwrap());
        fs::copy("memory.x", out.join("memory.x")).unwrap();
        println!("cargo:rustc-link-search={}", out.display());
        println!("cargo:rerun-if-changed=memory.x");

        println!("cargo:rustc-link-arg-examples=--nmagic");
        println!("cargo:rustc-link-arg-examples=-Tlink.x");
        println!("cargo:rustc-link-arg-examples=-Tdefmt.x");
    }
}
