//! PWM output abstraction
//!
//! The tube modules share a single blanking line; dimming is done by
//! PWM-ing that line rather than per tube.

/// Single PWM output channel with 8-bit duty resolution
pub trait PwmPin {
    /// Set the duty cycle (0 = always off, 255 = always on)
    fn set_duty(&mut self, duty: u8);

    /// Get the currently applied duty cycle
    fn duty(&self) -> u8;
}
