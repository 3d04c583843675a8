//! Chain renderer
//!
//! The tube modules form one long shift register: the first word clocked
//! in ends up in the farthest module. Rendering therefore walks the store
//! backwards and finishes with a single latch so every tube changes at once.

use crate::color::TubeColor;
use crate::traits::{TubeDriver, TubeOutput};
use crate::tube::{TubeState, TubeStore};

/// Hardware-ready view of one tube
pub fn tube_output(state: &TubeState) -> TubeOutput {
    TubeOutput {
        digit: state.displayed_digit(),
        color: TubeColor::quantize(state.color),
        lit: state.lit,
        comma: state.comma,
        brightness: state.brightness,
    }
}

/// Push every tube to the driver, farthest first, then commit once
pub fn render_all<D: TubeDriver>(store: &TubeStore, driver: &mut D) {
    for (index, state) in store.iter().enumerate().rev() {
        driver.set_tube(index as u8, tube_output(state));
    }
    driver.commit();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::tube::{Digit, TUBE_COUNT};
    use std::vec::Vec;

    #[derive(Debug, PartialEq)]
    enum Call {
        Set(u8, TubeOutput),
        Commit,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl TubeDriver for Recorder {
        fn set_tube(&mut self, index: u8, output: TubeOutput) {
            self.calls.push(Call::Set(index, output));
        }

        fn set_brightness(&mut self, _dim: u8) {}

        fn commit(&mut self) {
            self.calls.push(Call::Commit);
        }
    }

    #[test]
    fn test_farthest_tube_first_then_single_commit() {
        let store = TubeStore::new();
        let mut driver = Recorder::default();
        render_all(&store, &mut driver);

        assert_eq!(driver.calls.len(), TUBE_COUNT + 1);
        let order: Vec<u8> = driver
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Set(i, _) => Some(*i),
                Call::Commit => None,
            })
            .collect();
        assert_eq!(order, [5, 4, 3, 2, 1, 0]);
        assert_eq!(driver.calls.last(), Some(&Call::Commit));
    }

    #[test]
    fn test_output_is_quantized_and_clamped() {
        let mut store = TubeStore::new();
        store.set(
            1,
            TubeState {
                digit: Digit::Value(15),
                color: Rgb::new(240, 20, 20),
                lit: true,
                comma: false,
                brightness: 7,
            },
        );
        let mut driver = Recorder::default();
        render_all(&store, &mut driver);

        let expected = TubeOutput {
            digit: None,
            color: TubeColor::Red,
            lit: true,
            comma: false,
            brightness: 7,
        };
        assert!(driver.calls.contains(&Call::Set(1, expected)));
    }
}
