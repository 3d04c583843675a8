//! Board-agnostic core logic for the nixie tube chain firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (tube transport, reply channel, randomness)
//! - Color quantization onto the tube backlight palette
//! - Tube state store and chain renderer
//! - Attract/active mode state machine and attract animation
//! - The controller tying the serial protocol to the tubes
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

// Host tests collect into Vec/String
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod attract;
pub mod color;
pub mod config;
pub mod controller;
pub mod render;
pub mod state;
pub mod traits;
pub mod tube;

pub use color::{Rgb, TubeColor};
pub use controller::{Controller, Dispatch};
pub use tube::{Digit, TubeState, TubeStore, TUBE_COUNT};
