//! ADC noise sampling
//!
//! A floating ADC input picks up enough thermal and switching noise to
//! make a usable seed when mixed with the time since reset.

use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::Instant;

/// Samples folded into the seed
const NOISE_SAMPLES: u32 = 8;

/// Seed for the attract digit generator
pub async fn noise_seed(adc: &mut Adc<'_, Async>, channel: &mut Channel<'_>) -> u32 {
    let mut seed = Instant::now().as_micros() as u32;

    for i in 0..NOISE_SAMPLES {
        match adc.read(channel).await {
            // Low bits carry the noise
            Ok(sample) => seed ^= ((sample & 0x0f) as u32) << (i * 4),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("ADC read failed: {:?}", _e);
            }
        }
    }

    seed ^ Instant::now().as_micros() as u32
}
