//! RP2040 firmware mirroring button pins onto a USB HID gamepad.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Samples 21 active-low button inputs every 10 ms
//! 2. Maps each input to a gamepad button number
//! 3. Sends a 4-byte HID gamepad report whenever the buttons change
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | Buttons 1-15  | 0-14  | To ground, internal pull-up |
//! | Buttons 16-21 | 16-21 | To ground, internal pull-up |
//! | LED      | 25   | On-board LED (heartbeat) |
//!
//! # Architecture
//!
//! - **Core 0**: USB device stack, HID report writer, heartbeat LED
//! - **Core 1**: Button sampling and the [`Gamepad`] encoder
//!
//! The encoder is synchronous and blocks its core while waiting for the
//! host at startup, so it runs apart from the USB stack. Reports cross
//! cores through an Embassy [`Channel`](embassy_sync::channel::Channel).
//!
//! # Modules
//!
//! - [`config`]: Pin map, timing and USB identity
//! - [`input`]: GPIO button inputs ([`ButtonInputs`])
//! - [`usb_output`]: USB HID endpoint ([`UsbHidEndpoint`], [`UsbHidWriter`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent reset)
//!
//! # Re-exports
//!
//! This crate re-exports all public items from [`gamepad_core`] for convenience,
//! so consumers only need to depend on this crate.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

// Re-export core types for convenience
pub use gamepad_core::{
    find_device, render_states, ButtonPanel, Buttons, DeviceNotFound, Gamepad, GamepadError,
    GamepadReport, HidEndpoint, OutputError, ReportForwarder, ReportWriter, MAX_BUTTONS,
    READY_RETRY_DELAY_MS, USAGE_GAMEPAD, USAGE_PAGE_GENERIC_DESKTOP,
};

pub mod config;
pub mod input;
pub mod usb_output;

pub use input::{button_pin, ButtonInputs};
pub use usb_output::{
    configure_usb_hid, forward_reports, GamepadWriter, ReportChannel, UsbDriver, UsbHidEndpoint,
    UsbHidWriter, REPORT_DESCRIPTOR,
};
