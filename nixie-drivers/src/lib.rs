//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in nixie-core on top of the nixie-hal pin abstractions:
//!
//! - Shift-register tube chain transport with PWM blanking

#![no_std]
#![deny(unsafe_code)]

pub mod shift_chain;

pub use shift_chain::{encode_word, ShiftChain, WORD_BITS};
