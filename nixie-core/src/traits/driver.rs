//! Tube chain transport trait

use crate::color::TubeColor;

/// What one tube module is told to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TubeOutput {
    /// Cathode to light, `None` for blank
    pub digit: Option<u8>,
    /// Backlight color
    pub color: TubeColor,
    /// Whether the tube is energized
    pub lit: bool,
    /// Comma/decimal indicator
    pub comma: bool,
    /// Dim level, 0 = brightest
    pub brightness: u8,
}

/// Trait for the tube chain transport
///
/// Writes are staged with [`set_tube`](TubeDriver::set_tube) and become
/// visible together on [`commit`](TubeDriver::commit). Implementations are
/// expected to be fast and infallible; there is no recovery path for a
/// failed latch.
pub trait TubeDriver {
    /// Stage the state of one tube
    ///
    /// The renderer calls this for every tube, farthest first.
    fn set_tube(&mut self, index: u8, output: TubeOutput);

    /// Set the brightness shared by all tubes (0 = brightest)
    fn set_brightness(&mut self, dim: u8);

    /// Latch all staged tube states onto the outputs
    fn commit(&mut self);
}
