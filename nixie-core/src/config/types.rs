//! Configuration type definitions
//!
//! These types can be deserialized from the firmware's `nixie.toml` (with
//! the `serde` feature) and are checked with [`NixieConfig::validate`].

use core::fmt;

use crate::color::Rgb;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default host link speed
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// Default attract frame interval (ms)
pub const DEFAULT_ATTRACT_INTERVAL_MS: u32 = 50;

/// Default attract backlight color
pub const DEFAULT_ATTRACT_COLOR: Rgb = Rgb::new(255, 0, 0);

/// Baud rates the host link may be configured for
pub const SUPPORTED_BAUDRATES: [u32; 8] = [1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200];

/// Upper bound for both timing parameters (ms)
const MAX_INTERVAL_MS: u32 = 10_000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Baud rate not in [`SUPPORTED_BAUDRATES`]
    UnsupportedBaudrate(u32),
    /// Idle flush threshold zero or too long
    InvalidIdleFlush(u32),
    /// Attract interval zero or too long
    InvalidAttractInterval(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedBaudrate(b) => write!(f, "serial.baudrate {} is not a standard rate", b),
            ConfigError::InvalidIdleFlush(ms) => {
                write!(f, "framing.idle_flush_ms {} must be 1-{}", ms, MAX_INTERVAL_MS)
            }
            ConfigError::InvalidAttractInterval(ms) => {
                write!(f, "attract.interval_ms {} must be 1-{}", ms, MAX_INTERVAL_MS)
            }
        }
    }
}

/// Host serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialConfig {
    pub const fn new() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

/// Input line framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FramingConfig {
    /// Silence after which a partial line is parsed anyway (ms)
    pub idle_flush_ms: u32,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FramingConfig {
    pub const fn new() -> Self {
        Self {
            idle_flush_ms: nixie_protocol::IDLE_FLUSH_MS,
        }
    }
}

/// Attract animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttractConfig {
    /// Time between attract frames (ms)
    pub interval_ms: u32,
    /// Backlight color of every tube
    pub color: Rgb,
    /// Dim level, 0 = brightest
    pub brightness: u8,
}

impl Default for AttractConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AttractConfig {
    pub const fn new() -> Self {
        Self {
            interval_ms: DEFAULT_ATTRACT_INTERVAL_MS,
            color: DEFAULT_ATTRACT_COLOR,
            brightness: 0,
        }
    }
}

/// Complete firmware configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NixieConfig {
    pub serial: SerialConfig,
    pub framing: FramingConfig,
    pub attract: AttractConfig,
}

impl Default for NixieConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NixieConfig {
    /// Configuration with all defaults, usable in `const` context
    pub const fn new() -> Self {
        Self {
            serial: SerialConfig::new(),
            framing: FramingConfig::new(),
            attract: AttractConfig::new(),
        }
    }

    /// Check every parameter, reporting the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_BAUDRATES.contains(&self.serial.baudrate) {
            return Err(ConfigError::UnsupportedBaudrate(self.serial.baudrate));
        }
        if !(1..=MAX_INTERVAL_MS).contains(&self.framing.idle_flush_ms) {
            return Err(ConfigError::InvalidIdleFlush(self.framing.idle_flush_ms));
        }
        if !(1..=MAX_INTERVAL_MS).contains(&self.attract.interval_ms) {
            return Err(ConfigError::InvalidAttractInterval(self.attract.interval_ms));
        }
        Ok(())
    }
}
