//! Shift-register tube chain
//!
//! Every tube module carries three 8-bit shift registers wired in series,
//! and the modules are daisy-chained off a single data/clock/latch bus.
//! Words are shifted MSB-first; the first word sent ends up in the tube
//! farthest from the controller once the whole chain has been clocked.
//!
//! Tube word layout:
//!
//! | Bits  | Meaning                        |
//! |-------|--------------------------------|
//! | 0-9   | cathode select, one-hot        |
//! | 10    | comma                          |
//! | 11-13 | backlight LED red, green, blue |
//! | 14    | anode enable (lit)             |
//! | 15    | unused                         |
//! | 16-23 | per-tube brightness            |
//!
//! Global brightness goes to the shared blanking line, which is active
//! high: full duty means fully on.

use embedded_hal::delay::DelayNs;
use nixie_core::traits::{TubeDriver, TubeOutput};
use nixie_hal::{OutputPin, PwmPin};

/// Bits shifted per tube
pub const WORD_BITS: u32 = 24;

const COMMA_BIT: u32 = 10;
const LED_RED_BIT: u32 = 11;
const LED_GREEN_BIT: u32 = 12;
const LED_BLUE_BIT: u32 = 13;
const LIT_BIT: u32 = 14;
const BRIGHTNESS_SHIFT: u32 = 16;

/// Half period of the shift clock (ns)
const CLOCK_HALF_PERIOD_NS: u32 = 500;

/// Encode one tube into its 24-bit register word
pub fn encode_word(output: &TubeOutput) -> u32 {
    let mut word = 0u32;

    if let Some(digit) = output.digit {
        word |= 1 << digit;
    }
    if output.comma {
        word |= 1 << COMMA_BIT;
    }

    let mask = output.color.led_mask();
    if mask & 0b100 != 0 {
        word |= 1 << LED_RED_BIT;
    }
    if mask & 0b010 != 0 {
        word |= 1 << LED_GREEN_BIT;
    }
    if mask & 0b001 != 0 {
        word |= 1 << LED_BLUE_BIT;
    }

    if output.lit {
        word |= 1 << LIT_BIT;
    }
    word | ((output.brightness as u32) << BRIGHTNESS_SHIFT)
}

/// Tube chain driven over bit-banged GPIO
pub struct ShiftChain<P, L, B, D> {
    data: P,
    clock: P,
    latch: L,
    blanking: B,
    delay: D,
}

impl<P, L, B, D> ShiftChain<P, L, B, D>
where
    P: OutputPin,
    L: OutputPin,
    B: PwmPin,
    D: DelayNs,
{
    /// Create the transport with all lines idle and the chain blanked
    pub fn new(mut data: P, mut clock: P, mut latch: L, mut blanking: B, delay: D) -> Self {
        data.set_low();
        clock.set_low();
        latch.set_low();
        blanking.set_duty(0);

        Self {
            data,
            clock,
            latch,
            blanking,
            delay,
        }
    }

    fn shift_word(&mut self, word: u32) {
        for bit in (0..WORD_BITS).rev() {
            self.data.set_state(word & (1 << bit) != 0);
            self.delay.delay_ns(CLOCK_HALF_PERIOD_NS);
            self.clock.set_high();
            self.delay.delay_ns(CLOCK_HALF_PERIOD_NS);
            self.clock.set_low();
        }
    }

    /// Current duty on the blanking line
    pub fn blanking_duty(&self) -> u8 {
        self.blanking.duty()
    }
}

impl<P, L, B, D> TubeDriver for ShiftChain<P, L, B, D>
where
    P: OutputPin,
    L: OutputPin,
    B: PwmPin,
    D: DelayNs,
{
    fn set_tube(&mut self, _index: u8, output: TubeOutput) {
        #[cfg(feature = "defmt")]
        defmt::trace!("tube {} word {=u32:x}", _index, encode_word(&output));

        self.shift_word(encode_word(&output));
    }

    fn set_brightness(&mut self, dim: u8) {
        self.blanking.set_duty(u8::MAX - dim);
    }

    fn commit(&mut self) {
        self.latch.pulse();
    }
}
