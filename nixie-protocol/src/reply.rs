//! Replies sent back to the host
//!
//! Updates are never acknowledged. The firmware answers `42` and `A`,
//! and reports malformed input.

use core::fmt::Write;

/// Line terminator appended to every reply
pub const REPLY_TERMINATOR: &str = "\r\n";

/// Reply lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Answer to the `42` probe
    Probe,
    /// Confirmation of `A`
    AttractResumed,
    /// Malformed `N` line
    ParseError,
    /// Line exceeded the input buffer
    Overflow,
}

impl Reply {
    /// Reply text without terminator
    pub const fn text(self) -> &'static str {
        match self {
            Reply::Probe => "The answer to life, the universe and everything.",
            Reply::AttractResumed => "OK attract",
            Reply::ParseError => "ERR parse N line",
            Reply::Overflow => "ERR line overflow",
        }
    }

    /// Write the reply including its terminator
    pub fn write_line<W: Write>(self, out: &mut W) -> core::fmt::Result {
        out.write_str(self.text())?;
        out.write_str(REPLY_TERMINATOR)
    }
}
