//! Randomness for the attract animation

/// Source of random digits
pub trait DigitSource {
    /// Next digit, uniformly distributed over 0..=9
    fn next_digit(&mut self) -> u8;
}
