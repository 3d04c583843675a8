//! RP2040-specific HAL for the nixie tube chain firmware
//!
//! This crate provides RP2040 implementations of the shared `nixie-hal`
//! traits on top of `embassy-rp`:
//!
//! - Push-pull GPIO outputs for the shift register bus
//! - PWM channel for the blanking line
//! - Buffered UART halves for the host link
//! - ADC noise sampling to seed the attract animation

#![no_std]

pub mod adc;
pub mod gpio;
pub mod pwm;
pub mod uart;

pub use adc::noise_seed;
pub use gpio::RpOutput;
pub use pwm::RpPwm;
pub use uart::{to_embassy_config, RpUartRx, RpUartTx};
