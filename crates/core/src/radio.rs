//! Radio settings
//!
//! The access point reports its channel, bandwidth and transmit power in every
//! status message. The values are configured once at start-up; this module
//! validates them and derives the HT40 secondary channel.

use core::fmt;

/// Highest 2.4 GHz channel number
pub const MAX_CHANNEL: u8 = 14;

/// Channel width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bandwidth {
    /// 20 MHz (HT20)
    #[default]
    Ht20,
    /// 40 MHz (HT40)
    Ht40,
}

impl Bandwidth {
    /// Width in MHz
    pub fn mhz(self) -> u8 {
        match self {
            Bandwidth::Ht20 => 20,
            Bandwidth::Ht40 => 40,
        }
    }

    /// Parse a width given in MHz
    pub fn from_mhz(mhz: u8) -> Result<Self, RadioError> {
        match mhz {
            20 => Ok(Bandwidth::Ht20),
            40 => Ok(Bandwidth::Ht40),
            other => Err(RadioError::InvalidBandwidth(other)),
        }
    }
}

/// Position of the HT40 secondary channel relative to the primary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryChannel {
    /// No secondary channel (HT20)
    None,
    /// Secondary channel above the primary
    Above,
    /// Secondary channel below the primary
    Below,
}

/// Radio configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioError {
    /// Channel outside 1..=14
    InvalidChannel(u8),
    /// Bandwidth other than 20 or 40 MHz
    InvalidBandwidth(u8),
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadioError::InvalidChannel(ch) => write!(f, "Invalid channel: {}", ch),
            RadioError::InvalidBandwidth(bw) => write!(f, "Invalid bandwidth: {}MHz", bw),
        }
    }
}

/// Channel, width and transmit power of the soft-AP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioConfig {
    /// Primary channel (1..=14)
    pub channel: u8,
    /// Channel width
    pub bandwidth: Bandwidth,
    /// Maximum transmit power in driver units
    pub tx_power: i8,
}

impl RadioConfig {
    /// Create a validated radio configuration
    pub fn new(channel: u8, bandwidth: Bandwidth, tx_power: i8) -> Result<Self, RadioError> {
        let config = Self {
            channel,
            bandwidth,
            tx_power,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the channel range
    pub fn validate(&self) -> Result<(), RadioError> {
        if self.channel == 0 || self.channel > MAX_CHANNEL {
            return Err(RadioError::InvalidChannel(self.channel));
        }
        Ok(())
    }

    /// HT40 places the secondary channel above the primary on the low
    /// channels (1..=7) and below it on the high channels.
    pub fn secondary_channel(&self) -> SecondaryChannel {
        match self.bandwidth {
            Bandwidth::Ht20 => SecondaryChannel::None,
            Bandwidth::Ht40 if self.channel <= 7 => SecondaryChannel::Above,
            Bandwidth::Ht40 => SecondaryChannel::Below,
        }
    }
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            channel: 11,
            bandwidth: Bandwidth::Ht20,
            tx_power: 8,
        }
    }
}
