//! Nixie Serial Command Protocol
//!
//! This crate defines the text protocol spoken between a host controller
//! (typically a pinball machine framework) and the tube chain firmware.
//! The protocol is deliberately human-typeable so it can be exercised from
//! any serial terminal.
//!
//! # Protocol Overview
//!
//! One command per line, terminated by CR, LF or CRLF:
//! ```text
//! N,<idx>,<digit>,<r>,<g>,<b>,<dim>   update one tube
//! A                                   resume the attract animation
//! 42                                  diagnostic probe
//! ```
//!
//! The firmware only answers on errors and on the `A` / `42` commands; there
//! is no acknowledgement for tube updates.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod reply;

pub use command::{Command, ParseError, TubeUpdate, BLANK_DIGIT};
pub use line::{Line, LineError, LineFramer, IDLE_FLUSH_MS, LINE_CAPACITY};
pub use reply::{Reply, REPLY_TERMINATOR};

/// Number of tubes in the chain
pub const TUBE_COUNT: usize = 6;
