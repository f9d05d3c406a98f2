//! Mirroring a sampled frame of digital inputs onto the gamepad.

use heapless::String;

use crate::gamepad::{Gamepad, GamepadError};
use crate::output::HidEndpoint;
use crate::types::{Buttons, MAX_BUTTONS};

/// Capacity of [`render_states`] output: 32 four-byte glyphs plus separators.
pub const RENDER_CAPACITY: usize = 160;

const PRESSED_GLYPH: &str = "🤯";
const RELEASED_GLYPH: &str = "🏁";
const GROUP_SIZE: usize = 7;

/// Maps input slots (pins, in sampling order) to 1-based button numbers.
///
/// The map allows a miswired board to be corrected without touching the
/// sampling code.
///
/// # Example
///
/// ```
/// use gamepad_core::ButtonPanel;
///
/// let panel = ButtonPanel::new([1, 2, 4, 3]).unwrap();
/// assert_eq!(panel.button_for(2), Some(4));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPanel<const N: usize> {
    map: [u8; N],
}

impl<const N: usize> ButtonPanel<N> {
    const FITS_REPORT: () = assert!(N <= MAX_BUTTONS as usize, "too many buttons for the report");

    /// Create a panel from an explicit slot-to-button map.
    pub fn new(map: [u8; N]) -> Result<Self, GamepadError> {
        if let Some(&bad) = map.iter().find(|&&b| Buttons::button(b).is_none()) {
            return Err(GamepadError::ButtonOutOfRange(bad));
        }
        Ok(Self { map })
    }

    /// Create a panel where slot `i` drives button `i + 1`.
    #[must_use]
    pub const fn sequential() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS_REPORT;

        let mut map = [0u8; N];
        let mut i = 0;
        while i < N {
            map[i] = (i + 1) as u8;
            i += 1;
        }
        Self { map }
    }

    /// Button number driven by input `slot`.
    #[inline]
    #[must_use]
    pub fn button_for(&self, slot: usize) -> Option<u8> {
        self.map.get(slot).copied()
    }

    /// Apply one frame of input states to `gamepad`.
    ///
    /// Pressed slots are pressed together, then released slots are released
    /// together, so a frame costs at most two reports and none when the
    /// state is unchanged.
    pub fn apply<E: HidEndpoint>(
        &self,
        gamepad: &mut Gamepad<E>,
        states: &[bool; N],
    ) -> Result<(), GamepadError> {
        // Every slot lands in exactly one of the two buffers, so neither
        // length can exceed N.
        let mut pressed = [0u8; N];
        let mut released = [0u8; N];
        let (mut n_pressed, mut n_released) = (0, 0);

        for (&button, &state) in self.map.iter().zip(states) {
            if state {
                pressed[n_pressed] = button;
                n_pressed += 1;
            } else {
                released[n_released] = button;
                n_released += 1;
            }
        }

        gamepad.press_buttons(&pressed[..n_pressed])?;
        gamepad.release_buttons(&released[..n_released])
    }
}

/// Render input states as one glyph per input, grouped by seven.
///
/// At most [`MAX_BUTTONS`] states are rendered.
#[must_use]
pub fn render_states(states: &[bool]) -> String<RENDER_CAPACITY> {
    let mut out = String::new();

    for (i, &state) in states.iter().take(MAX_BUTTONS as usize).enumerate() {
        let glyph = if state { PRESSED_GLYPH } else { RELEASED_GLYPH };
        if out.push_str(glyph).is_err() {
            break;
        }
        if i % GROUP_SIZE == GROUP_SIZE - 1 && out.push(' ').is_err() {
            break;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::gamepad::tests::gamepad;
    use crate::report::GamepadReport;
    use std::vec;

    #[test]
    fn test_sequential_map() {
        let panel = ButtonPanel::<21>::sequential();
        assert_eq!(panel.button_for(0), Some(1));
        assert_eq!(panel.button_for(20), Some(21));
        assert_eq!(panel.button_for(21), None);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(
            ButtonPanel::new([1, 0, 3]),
            Err(GamepadError::ButtonOutOfRange(0))
        );
        assert_eq!(
            ButtonPanel::new([1, 33]),
            Err(GamepadError::ButtonOutOfRange(33))
        );
    }

    #[test]
    fn test_apply_mirrors_states() {
        let (mut gamepad, sent) = gamepad();
        let panel = ButtonPanel::<4>::sequential();

        panel.apply(&mut gamepad, &[true, false, true, false]).unwrap();

        assert_eq!(*sent.lock().unwrap(), vec![[0b0101, 0, 0, 0]]);
    }

    #[test]
    fn test_apply_unchanged_frame_sends_nothing() {
        let (mut gamepad, sent) = gamepad();
        let panel = ButtonPanel::<4>::sequential();

        panel.apply(&mut gamepad, &[false; 4]).unwrap();
        panel.apply(&mut gamepad, &[true, true, false, false]).unwrap();
        panel.apply(&mut gamepad, &[true, true, false, false]).unwrap();

        assert_eq!(*sent.lock().unwrap(), vec![[0b0011, 0, 0, 0]]);
    }

    #[test]
    fn test_apply_press_and_release_in_one_frame() {
        let (mut gamepad, sent) = gamepad();
        let panel = ButtonPanel::<3>::sequential();

        panel.apply(&mut gamepad, &[true, false, false]).unwrap();
        panel.apply(&mut gamepad, &[false, false, true]).unwrap();

        // Second frame: press 3 first, then release 1.
        assert_eq!(
            *sent.lock().unwrap(),
            vec![[0b001, 0, 0, 0], [0b101, 0, 0, 0], [0b100, 0, 0, 0]]
        );
    }

    #[test]
    fn test_apply_full_frames() {
        let (mut gamepad, sent) = gamepad();
        let panel = ButtonPanel::<32>::sequential();

        panel.apply(&mut gamepad, &[true; 32]).unwrap();
        panel.apply(&mut gamepad, &[false; 32]).unwrap();

        assert_eq!(
            *sent.lock().unwrap(),
            vec![[0xFF, 0xFF, 0xFF, 0xFF], [0, 0, 0, 0]]
        );
    }

    #[test]
    fn test_apply_uses_map() {
        let (mut gamepad, _sent) = gamepad();
        let panel = ButtonPanel::new([32, 9]).unwrap();

        panel.apply(&mut gamepad, &[true, true]).unwrap();

        assert_eq!(
            gamepad.last_report(),
            &GamepadReport::from_bytes([0, 0x01, 0, 0x80])
        );
    }

    #[test]
    fn test_render_states_groups() {
        let mut states = [false; 21];
        states[0] = true;
        states[20] = true;

        let rendered = render_states(&states);

        assert_eq!(
            rendered.as_str(),
            "🤯🏁🏁🏁🏁🏁🏁 🏁🏁🏁🏁🏁🏁🏁 🏁🏁🏁🏁🏁🏁🤯 "
        );
    }

    #[test]
    fn test_render_states_caps_at_max_buttons() {
        let rendered = render_states(&[true; 40]);
        assert_eq!(rendered.chars().filter(|&c| c != ' ').count(), 32);
    }
}
