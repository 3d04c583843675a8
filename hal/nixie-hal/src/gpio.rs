//! GPIO pin abstractions
//!
//! The shift register chain only needs push-pull outputs: serial data,
//! shift clock and storage latch.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }

    /// Drive a full low-high-low pulse
    ///
    /// Used for shift clocks and latch strobes. Timing between edges is the
    /// caller's responsibility.
    fn pulse(&mut self) {
        self.set_low();
        self.set_high();
        self.set_low();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingPin {
        high: bool,
        rising_edges: u8,
    }

    impl OutputPin for RecordingPin {
        fn set_high(&mut self) {
            if !self.high {
                self.rising_edges += 1;
            }
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_set_state() {
        let mut pin = RecordingPin {
            high: false,
            rising_edges: 0,
        };

        pin.set_state(true);
        assert!(pin.is_set_high());

        pin.set_state(false);
        assert!(pin.is_set_low());
    }

    #[test]
    fn test_pulse_ends_low_with_one_edge() {
        let mut pin = RecordingPin {
            high: true,
            rising_edges: 0,
        };

        pin.pulse();
        assert!(pin.is_set_low());
        assert_eq!(pin.rising_edges, 1);
    }
}
