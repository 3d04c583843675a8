//! Per-tube display state
//!
//! [`TubeStore`] is the single source of truth for what the chain should
//! show. Both the serial commands and the attract animation write through
//! [`TubeStore::set`]; the renderer only reads.

use nixie_protocol::TubeUpdate;

use crate::color::Rgb;

pub use nixie_protocol::TUBE_COUNT;

/// Digit shown by a tube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Digit {
    /// Cathode 0-9
    Value(u8),
    /// No cathode selected
    #[default]
    Blank,
}

impl Digit {
    /// Build a digit, clamping anything above 9 to blank
    pub const fn new(value: u8) -> Self {
        if value <= 9 {
            Digit::Value(value)
        } else {
            Digit::Blank
        }
    }

    /// The cathode number, if it is a real digit
    pub const fn value(self) -> Option<u8> {
        match self {
            Digit::Value(v) if v <= 9 => Some(v),
            _ => None,
        }
    }
}

impl From<Option<u8>> for Digit {
    fn from(value: Option<u8>) -> Self {
        value.map_or(Digit::Blank, Digit::new)
    }
}

/// Display attributes of one tube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TubeState {
    pub digit: Digit,
    /// Requested backlight color (quantized when rendered)
    pub color: Rgb,
    /// Whether the digit cathode is energized at all
    pub lit: bool,
    /// Auxiliary comma/decimal indicator
    pub comma: bool,
    /// Dim level, 0 = brightest
    pub brightness: u8,
}

impl Default for TubeState {
    fn default() -> Self {
        Self::OFF
    }
}

impl TubeState {
    /// Dark tube
    pub const OFF: Self = Self {
        digit: Digit::Blank,
        color: Rgb::new(0, 0, 0),
        lit: false,
        comma: false,
        brightness: 0,
    };

    /// Digit that actually reaches the cathodes
    ///
    /// An unlit tube, or a lit one without a valid digit, shows nothing.
    pub fn displayed_digit(&self) -> Option<u8> {
        if self.lit {
            self.digit.value()
        } else {
            None
        }
    }
}

impl From<&TubeUpdate> for TubeState {
    fn from(update: &TubeUpdate) -> Self {
        Self {
            digit: Digit::from(update.digit),
            color: Rgb::new(update.red, update.green, update.blue),
            lit: update.lit(),
            comma: false,
            brightness: update.dim,
        }
    }
}

/// Fixed-size store of all tube states
///
/// Index 0 is the tube nearest the controller in the shift chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TubeStore {
    tubes: [TubeState; TUBE_COUNT],
}

impl Default for TubeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TubeStore {
    /// Create a store with every tube dark
    pub const fn new() -> Self {
        Self {
            tubes: [TubeState::OFF; TUBE_COUNT],
        }
    }

    /// Replace the state of one tube
    ///
    /// Out-of-range indices are ignored; callers validate before getting
    /// here.
    pub fn set(&mut self, index: usize, state: TubeState) {
        if let Some(tube) = self.tubes.get_mut(index) {
            *tube = state;
        }
    }

    /// Get the state of one tube
    pub fn get(&self, index: usize) -> Option<&TubeState> {
        self.tubes.get(index)
    }

    /// Iterate tubes from nearest (index 0) to farthest
    pub fn iter(&self) -> core::slice::Iter<'_, TubeState> {
        self.tubes.iter()
    }

    /// Number of tubes
    pub const fn len(&self) -> usize {
        TUBE_COUNT
    }

    /// Always false; the chain has a fixed, non-zero length
    pub const fn is_empty(&self) -> bool {
        TUBE_COUNT == 0
    }
}
