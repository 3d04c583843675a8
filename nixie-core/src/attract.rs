//! Attract animation
//!
//! With no host attached every tube flickers through random digits in a
//! fixed color. The randomness only needs to look lively, so a seeded LCG
//! is plenty.

use crate::config::AttractConfig;
use crate::traits::DigitSource;
use crate::tube::{Digit, TubeState, TubeStore, TUBE_COUNT};

// Numerical Recipes LCG parameters
const LCG_A: u32 = 1_664_525;
const LCG_C: u32 = 1_013_904_223;

/// Largest multiple of 10 that fits in 16 bits; samples above it are redrawn
const DIGIT_SAMPLE_LIMIT: u32 = 65_530;

/// 32-bit linear congruential generator
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator from a boot-time seed
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance and return the raw state
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG_A).wrapping_add(LCG_C);
        self.state
    }
}

impl DigitSource for Lcg {
    fn next_digit(&mut self) -> u8 {
        // Low LCG bits have short periods; use the top half
        loop {
            let sample = self.next_u32() >> 16;
            if sample < DIGIT_SAMPLE_LIMIT {
                return (sample % 10) as u8;
            }
        }
    }
}

/// Give every tube a random digit in the attract color
pub fn fill_attract_frame<R: DigitSource>(store: &mut TubeStore, rng: &mut R, config: &AttractConfig) {
    for index in 0..TUBE_COUNT {
        store.set(
            index,
            TubeState {
                digit: Digit::new(rng.next_digit()),
                color: config.color,
                lit: true,
                comma: false,
                brightness: config.brightness,
            },
        );
    }
}
