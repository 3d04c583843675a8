//! Nixie Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that the tube chain
//! transport and the serial link are written against. Chip-specific crates
//! (currently `nixie-hal-rp2040`) implement them, which keeps the drivers
//! and the controller testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  nixie-firmware / nixie-drivers         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  nixie-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Shift register data, clock and latch lines
//! - [`pwm::PwmPin`] - Shared blanking (brightness) line
//! - [`uart::UartTx`], [`uart::UartRx`] - Host serial link

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use pwm::PwmPin;
pub use uart::{UartConfig, UartRx, UartTx};
