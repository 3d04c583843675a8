//! Display mode state machine
//!
//! Decides who owns the tubes: the attract animation or the host.
//! The state machine is explicit and deterministic.

pub mod events;
pub mod machine;

pub use events::ModeEvent;
pub use machine::Mode;
