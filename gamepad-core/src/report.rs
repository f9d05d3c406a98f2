//! Wire encoding of the 4-byte gamepad input report.
//!
//! | Byte | Content |
//! |------|---------|
//! | 0    | Buttons 1-8 (bit 0 = button 1) |
//! | 1    | Buttons 9-16 |
//! | 2    | Buttons 17-24 |
//! | 3    | Buttons 25-32 (bit 7 = button 32) |
//!
//! The four bytes form one little-endian 32-bit field. The report descriptor
//! declares it as a signed field; the unsigned mask serializes to the same
//! bytes, so both views are interchangeable on the wire.

use crate::types::Buttons;

const REPORT_SIZE: usize = 4;

/// USB HID gamepad input report.
///
/// Holds the serialized button mask. The encoder keeps one live report and
/// one copy of the last report it transmitted, both overwritten in place.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct GamepadReport([u8; REPORT_SIZE]);

impl GamepadReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = REPORT_SIZE;

    /// Neutral/zero report.
    #[must_use]
    pub const fn neutral() -> Self {
        Self([0; Self::SIZE])
    }

    /// Build a report from raw wire bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }

    /// Overwrite this report with the serialized `buttons`.
    #[inline]
    pub fn encode(&mut self, buttons: Buttons) {
        self.0 = (buttons.raw() as i32).to_le_bytes();
    }

    /// Decode the button mask carried by this report.
    #[inline]
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        Buttons(i32::from_le_bytes(self.0) as u32)
    }

    /// The report as wire bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }
}

impl From<Buttons> for GamepadReport {
    fn from(buttons: Buttons) -> Self {
        let mut report = Self::neutral();
        report.encode(buttons);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_first_and_last_button() {
        let report = GamepadReport::from(Buttons::button(1).unwrap());
        assert_eq!(report.as_bytes(), &[0x01, 0x00, 0x00, 0x00]);

        let report = GamepadReport::from(Buttons::button(32).unwrap());
        assert_eq!(report.as_bytes(), &[0x00, 0x00, 0x00, 0x80]);
    }

    #[test]
    fn test_layout_byte_boundaries() {
        let buttons = Buttons::button(8).unwrap()
            | Buttons::button(9).unwrap()
            | Buttons::button(17).unwrap()
            | Buttons::button(25).unwrap();
        let report = GamepadReport::from(buttons);
        assert_eq!(report.as_bytes(), &[0x80, 0x01, 0x01, 0x01]);
    }

    #[test]
    fn test_decode_recovers_mask() {
        let report = GamepadReport::from(Buttons(0b101));
        assert_eq!(report.as_bytes(), &[0x05, 0x00, 0x00, 0x00]);
        assert_eq!(report.buttons(), Buttons(0b101));
    }

    #[test]
    fn test_matches_signed_pack() {
        // Sign bit set: same bytes as packing the mask as an i32.
        let report = GamepadReport::from(Buttons(0x8000_0001));
        assert_eq!(report.as_bytes(), &i32::MIN.wrapping_add(1).to_le_bytes());
        assert_eq!(report.buttons(), Buttons(0x8000_0001));
    }

    #[test]
    fn test_encode_overwrites_in_place() {
        let mut report = GamepadReport::from(Buttons(u32::MAX));
        report.encode(Buttons::NONE);
        assert_eq!(report, GamepadReport::neutral());
    }
}
