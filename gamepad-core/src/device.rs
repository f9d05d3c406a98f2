//! Locating the gamepad endpoint among the host platform's HID endpoints.

use crate::output::HidEndpoint;

/// HID usage page for Generic Desktop controls.
pub const USAGE_PAGE_GENERIC_DESKTOP: u16 = 0x01;

/// HID usage for a gamepad within the Generic Desktop page.
pub const USAGE_GAMEPAD: u16 = 0x05;

/// No endpoint matched the requested usage page and usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceNotFound {
    pub usage_page: u16,
    pub usage: u16,
}

impl core::fmt::Display for DeviceNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "could not find matching HID device (usage page {:#04x}, usage {:#04x})",
            self.usage_page, self.usage
        )
    }
}

/// Find the first endpoint declaring `usage_page`/`usage` that can send reports.
///
/// Endpoints are checked in iteration order, so the first match wins. A
/// single endpoint can be passed as a one-element array.
///
/// # Example
///
/// ```
/// use gamepad_core::{find_device, HidEndpoint, OutputError, USAGE_GAMEPAD, USAGE_PAGE_GENERIC_DESKTOP};
///
/// struct Gamepad;
///
/// impl HidEndpoint for Gamepad {
///     fn usage_page(&self) -> u16 { USAGE_PAGE_GENERIC_DESKTOP }
///     fn usage(&self) -> u16 { USAGE_GAMEPAD }
///     fn send_report(&mut self, _report: &[u8]) -> Result<(), OutputError> { Ok(()) }
/// }
///
/// assert!(find_device([Gamepad], USAGE_PAGE_GENERIC_DESKTOP, USAGE_GAMEPAD).is_ok());
/// ```
pub fn find_device<I>(endpoints: I, usage_page: u16, usage: u16) -> Result<I::Item, DeviceNotFound>
where
    I: IntoIterator,
    I::Item: HidEndpoint,
{
    endpoints
        .into_iter()
        .find(|ep| ep.usage_page() == usage_page && ep.usage() == usage && ep.can_send())
        .ok_or(DeviceNotFound { usage_page, usage })
}
