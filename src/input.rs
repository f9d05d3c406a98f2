//! Button inputs sampled from GPIO.
//!
//! Every button closes to ground, so inputs use the internal pull-up and
//! read low while pressed.

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;

/// Configure `pin` as a pulled-up button input.
#[must_use]
pub fn button_pin<'d>(pin: Peri<'d, impl Pin>) -> Input<'d> {
    Input::new(pin, Pull::Up)
}

/// A fixed set of button inputs, in slot order.
pub struct ButtonInputs<'d, const N: usize> {
    pins: [Input<'d>; N],
}

impl<'d, const N: usize> ButtonInputs<'d, N> {
    /// Create the input set from already configured pins.
    #[must_use]
    pub fn new(pins: [Input<'d>; N]) -> Self {
        Self { pins }
    }

    /// Sample every input; `true` means pressed.
    #[must_use]
    pub fn read(&self) -> [bool; N] {
        core::array::from_fn(|i| self.pins[i].is_low())
    }
}
