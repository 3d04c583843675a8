//! PWM output for the blanking line
//!
//! The slice counter wraps at 255 so the 8-bit duty maps directly onto
//! the compare register.

use embassy_rp::pwm::{Config, Pwm};
use nixie_hal::PwmPin;

/// Counter top; one count per duty step
const TOP: u16 = u8::MAX as u16;

/// `PwmPin` over channel A of an embassy-rp PWM slice
pub struct RpPwm {
    pwm: Pwm<'static>,
    config: Config,
}

impl RpPwm {
    /// Take over a slice created with `Pwm::new_output_a`, starting at 0 duty
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = Config::default();
        config.top = TOP;
        config.compare_a = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl PwmPin for RpPwm {
    fn set_duty(&mut self, duty: u8) {
        // Compare above TOP holds the output high for the whole period
        self.config.compare_a = if duty == u8::MAX { TOP + 1 } else { duty as u16 };
        self.pwm.set_config(&self.config);
    }

    fn duty(&self) -> u8 {
        self.config.compare_a.min(TOP) as u8
    }
}
