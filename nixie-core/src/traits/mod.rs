//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod driver;
pub mod random;
pub mod reply;

pub use driver::{TubeDriver, TubeOutput};
pub use random::DigitSource;
pub use reply::ReplySink;
