//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (pico2_w): Uses defmt
//! - Host runtime (std feature): Uses tracing
//! - Host tests: Uses println!
//! - Host non-test: No-op
//!
//! Arguments must implement both `defmt::Format` and `core::fmt::Display`,
//! so addresses are logged as octets and enums through their `as_str()`.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), feature = "std"))]
        ::tracing::info!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), not(feature = "std"), test))]
        println!("[INFO] {}", format!($($arg)*));
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), feature = "std"))]
        ::tracing::warn!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), not(feature = "std"), test))]
        println!("[WARN] {}", format!($($arg)*));
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), feature = "std"))]
        ::tracing::error!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), not(feature = "std"), test))]
        eprintln!("[ERROR] {}", format!($($arg)*));
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), feature = "std"))]
        ::tracing::debug!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), not(feature = "std"), test))]
        println!("[DEBUG] {}", format!($($arg)*));
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), feature = "std"))]
        ::tracing::trace!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), not(feature = "std"), test))]
        println!("[TRACE] {}", format!($($arg)*));
    }};
}
