//! GPIO outputs

use embassy_rp::gpio::Output;
use nixie_hal::OutputPin;

/// `OutputPin` over an embassy-rp push-pull output
pub struct RpOutput(Output<'static>);

impl RpOutput {
    pub fn new(pin: Output<'static>) -> Self {
        Self(pin)
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}
