//! Gamepad: button state, report encoding and transmission.

use embedded_hal::delay::DelayNs;

use crate::device::{find_device, DeviceNotFound, USAGE_GAMEPAD, USAGE_PAGE_GENERIC_DESKTOP};
use crate::output::{HidEndpoint, OutputError};
use crate::report::GamepadReport;
use crate::types::{Buttons, MAX_BUTTONS};

/// Wait before retrying the first report when the transport is not up yet.
pub const READY_RETRY_DELAY_MS: u32 = 1000;

/// A generic 32-button USB HID gamepad, buttons numbered 1-32.
///
/// Button changes are encoded into a [`GamepadReport`] and sent to the
/// endpoint only when the encoded report differs from the last one sent, so
/// the host sees at most one report per distinct button state.
///
/// All operations are synchronous and run to completion. Transport errors
/// are returned to the caller; the report that failed is not remembered, so
/// the next change is compared against the last report that actually went out.
pub struct Gamepad<E> {
    endpoint: E,
    buttons: Buttons,
    report: GamepadReport,
    last_report: GamepadReport,
}

impl<E: HidEndpoint> Gamepad<E> {
    /// Create a gamepad on the Generic Desktop / Gamepad endpoint in `endpoints`.
    ///
    /// Sends an initial all-released report. The USB stack may not have been
    /// configured by the host yet, so if that first report fails the gamepad
    /// waits [`READY_RETRY_DELAY_MS`] on `delay` and tries once more. An error
    /// from the second attempt is returned.
    pub fn new<I, D>(endpoints: I, delay: &mut D) -> Result<Self, GamepadError>
    where
        I: IntoIterator<Item = E>,
        D: DelayNs,
    {
        let endpoint = find_device(endpoints, USAGE_PAGE_GENERIC_DESKTOP, USAGE_GAMEPAD)?;
        let mut gamepad = Self {
            endpoint,
            buttons: Buttons::NONE,
            report: GamepadReport::neutral(),
            last_report: GamepadReport::neutral(),
        };

        if let Err(GamepadError::Transport(_)) = gamepad.reset_all() {
            delay.delay_ms(READY_RETRY_DELAY_MS);
            gamepad.reset_all()?;
        }

        Ok(gamepad)
    }

    /// Press and hold the given buttons.
    ///
    /// Every number is validated before any state changes.
    pub fn press_buttons(&mut self, buttons: &[u8]) -> Result<(), GamepadError> {
        let mask = mask_for(buttons)?;
        self.buttons |= mask;
        self.send(false)
    }

    /// Release the given buttons.
    ///
    /// Every number is validated before any state changes.
    pub fn release_buttons(&mut self, buttons: &[u8]) -> Result<(), GamepadError> {
        let mask = mask_for(buttons)?;
        self.buttons &= !mask;
        self.send(false)
    }

    /// Release all the buttons.
    pub fn release_all_buttons(&mut self) -> Result<(), GamepadError> {
        self.buttons = Buttons::NONE;
        self.send(false)
    }

    /// Press and release the given buttons.
    pub fn click_buttons(&mut self, buttons: &[u8]) -> Result<(), GamepadError> {
        self.press_buttons(buttons)?;
        self.release_buttons(buttons)
    }

    /// Release all buttons and send the report even if nothing changed.
    pub fn reset_all(&mut self) -> Result<(), GamepadError> {
        self.buttons = Buttons::NONE;
        self.send(true)
    }

    /// The last report successfully handed to the endpoint.
    #[inline]
    #[must_use]
    pub fn last_report(&self) -> &GamepadReport {
        &self.last_report
    }

    /// Get a reference to the endpoint.
    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Get a mutable reference to the endpoint.
    pub fn endpoint_mut(&mut self) -> &mut E {
        &mut self.endpoint
    }

    /// Decompose the gamepad into its endpoint.
    pub fn into_endpoint(self) -> E {
        self.endpoint
    }

    fn send(&mut self, always: bool) -> Result<(), GamepadError> {
        self.report.encode(self.buttons);

        if always || self.report != self.last_report {
            self.endpoint
                .send_report(self.report.as_bytes())
                .map_err(GamepadError::Transport)?;
            self.last_report = self.report;
        }
        Ok(())
    }
}

/// Combine 1-based button numbers into a mask, rejecting any out of range.
fn mask_for(buttons: &[u8]) -> Result<Buttons, GamepadError> {
    buttons.iter().try_fold(Buttons::NONE, |mask, &number| {
        Buttons::button(number)
            .map(|b| mask | b)
            .ok_or(GamepadError::ButtonOutOfRange(number))
    })
}

/// Error type for gamepad operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamepadError {
    /// No Generic Desktop / Gamepad endpoint was found.
    DeviceNotFound(DeviceNotFound),
    /// Button number outside `1..=32`.
    ButtonOutOfRange(u8),
    /// The endpoint failed to send a report.
    Transport(OutputError),
}

impl From<DeviceNotFound> for GamepadError {
    fn from(err: DeviceNotFound) -> Self {
        GamepadError::DeviceNotFound(err)
    }
}

impl From<OutputError> for GamepadError {
    fn from(err: OutputError) -> Self {
        GamepadError::Transport(err)
    }
}

impl core::fmt::Display for GamepadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GamepadError::DeviceNotFound(e) => write!(f, "{e}"),
            GamepadError::ButtonOutOfRange(n) => {
                write!(f, "button number {n} must be in range 1 to {MAX_BUTTONS}")
            }
            GamepadError::Transport(e) => write!(f, "{e}"),
        }
    }
}
