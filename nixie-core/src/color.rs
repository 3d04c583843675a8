//! Backlight color quantization
//!
//! Each tube module has a three-channel on/off LED behind the glass, so it
//! can only show the seven colors of [`TubeColor::PALETTE`]. Hosts send full
//! 24-bit colors; the nearest palette entry is picked at render time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 24-bit color as requested by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB space
    pub const fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r.abs_diff(other.r) as u32;
        let dg = self.g.abs_diff(other.g) as u32;
        let db = self.b.abs_diff(other.b) as u32;
        dr * dr + dg * dg + db * db
    }
}

/// Hardware backlight colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TubeColor {
    Blue,
    Green,
    Red,
    White,
    Magenta,
    Yellow,
    Cyan,
}

// LED channel bits
const LED_RED: u8 = 0b100;
const LED_GREEN: u8 = 0b010;
const LED_BLUE: u8 = 0b001;

impl TubeColor {
    /// Palette in tie-break order: on equal distance the earlier entry wins
    pub const PALETTE: [TubeColor; 7] = [
        TubeColor::Blue,
        TubeColor::Green,
        TubeColor::Red,
        TubeColor::White,
        TubeColor::Magenta,
        TubeColor::Yellow,
        TubeColor::Cyan,
    ];

    /// Nominal RGB value of this palette entry
    pub const fn rgb(self) -> Rgb {
        match self {
            TubeColor::Blue => Rgb::new(0, 0, 255),
            TubeColor::Green => Rgb::new(0, 255, 0),
            TubeColor::Red => Rgb::new(255, 0, 0),
            TubeColor::White => Rgb::new(255, 255, 255),
            TubeColor::Magenta => Rgb::new(255, 0, 255),
            TubeColor::Yellow => Rgb::new(255, 255, 0),
            TubeColor::Cyan => Rgb::new(0, 255, 255),
        }
    }

    /// LED channels to switch on, as `0b_rgb`
    pub const fn led_mask(self) -> u8 {
        match self {
            TubeColor::Blue => LED_BLUE,
            TubeColor::Green => LED_GREEN,
            TubeColor::Red => LED_RED,
            TubeColor::White => LED_RED | LED_GREEN | LED_BLUE,
            TubeColor::Magenta => LED_RED | LED_BLUE,
            TubeColor::Yellow => LED_RED | LED_GREEN,
            TubeColor::Cyan => LED_GREEN | LED_BLUE,
        }
    }

    /// Map an arbitrary color to the nearest palette entry
    ///
    /// Exact palette values are returned without going through the distance
    /// metric.
    pub fn quantize(rgb: Rgb) -> Self {
        if let Some(exact) = Self::PALETTE.iter().copied().find(|c| c.rgb() == rgb) {
            return exact;
        }

        let mut best = Self::PALETTE[0];
        let mut best_distance = u32::MAX;
        for candidate in Self::PALETTE {
            let distance = rgb.distance_sq(candidate.rgb());
            // Strict comparison keeps the first entry on ties
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }
}
