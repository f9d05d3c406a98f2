//! Button bitmask for a 32-button gamepad.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Highest button number the report can carry.
pub const MAX_BUTTONS: u8 = 32;

/// Button state represented as a bitfield.
///
/// Bit `n` (0-indexed) holds button `n + 1`, so button numbers match the
/// 1-based numbering games and HID descriptors use.
///
/// # Example
///
/// ```
/// use gamepad_core::Buttons;
///
/// let buttons = Buttons::button(1).unwrap() | Buttons::button(3).unwrap();
/// assert!(buttons.is_pressed(1));
/// assert!(!buttons.is_pressed(2));
/// assert_eq!(buttons.raw(), 0b101);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u32);

impl Buttons {
    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Mask for a single 1-based button number.
    ///
    /// Returns `None` if `number` is outside `1..=MAX_BUTTONS`.
    #[inline]
    #[must_use]
    pub const fn button(number: u8) -> Option<Self> {
        if number >= 1 && number <= MAX_BUTTONS {
            Some(Self(1 << (number - 1)))
        } else {
            None
        }
    }

    /// Check if all of the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, buttons: Buttons) -> bool {
        (self.0 & buttons.0) == buttons.0
    }

    /// Check if the 1-based button `number` is pressed.
    ///
    /// Out-of-range numbers are never pressed.
    #[inline]
    #[must_use]
    pub const fn is_pressed(self, number: u8) -> bool {
        match Self::button(number) {
            Some(b) => self.contains(b),
            None => false,
        }
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, buttons: Buttons, pressed: bool) {
        if pressed {
            self.0 |= buttons.0;
        } else {
            self.0 &= !buttons.0;
        }
    }

    /// Get the raw u32 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_bounds() {
        assert_eq!(Buttons::button(1), Some(Buttons(1)));
        assert_eq!(Buttons::button(32), Some(Buttons(0x8000_0000)));
        assert_eq!(Buttons::button(0), None);
        assert_eq!(Buttons::button(33), None);
    }

    #[test]
    fn test_buttons_bitwise_or() {
        let buttons = Buttons::button(1).unwrap() | Buttons::button(2).unwrap();
        assert!(buttons.is_pressed(1));
        assert!(buttons.is_pressed(2));
        assert!(!buttons.is_pressed(3));
    }

    #[test]
    fn test_buttons_set_clear() {
        let b21 = Buttons::button(21).unwrap();
        let mut buttons = Buttons::NONE;
        buttons.set(b21, true);
        assert!(buttons.is_pressed(21));
        buttons.set(b21, false);
        assert!(buttons.is_empty());
    }

    #[test]
    fn test_is_pressed_out_of_range() {
        let all = Buttons(u32::MAX);
        assert!(all.is_pressed(32));
        assert!(!all.is_pressed(0));
        assert!(!all.is_pressed(33));
    }
}
