//! Platform abstraction layer
//!
//! All hardware-specific code is isolated in this module. Only the Pico 2 W
//! (RP2350 + CYW43439) is supported; the host rendition lives in the
//! `pico_link_host` crate.

pub mod rp2350;
