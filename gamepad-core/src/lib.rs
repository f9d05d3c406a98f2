//! Platform-agnostic USB HID gamepad report encoding.
//!
//! This crate holds everything between "button N is down" and "these four
//! bytes go to the host", without any platform-specific dependencies. It can
//! be used both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! - [`types`]: Button bitmask ([`Buttons`])
//! - [`report`]: 4-byte wire report ([`GamepadReport`])
//! - [`output`]: Endpoint trait ([`HidEndpoint`]) and transport errors
//! - [`device`]: Finding the gamepad endpoint ([`find_device`])
//! - [`gamepad`]: Button state and deduplicated transmission ([`Gamepad`])
//! - [`panel`]: Mirroring sampled inputs onto the gamepad ([`ButtonPanel`])
//! - [`forward`]: Resending reports lost between queue and host ([`ReportForwarder`])
//!
//! # Report Format
//!
//! ```text
//! byte 0: buttons 1-8   (bit 0 = button 1)
//! byte 1: buttons 9-16
//! byte 2: buttons 17-24
//! byte 3: buttons 25-32 (bit 7 = button 32)
//! ```
//!
//! # Example
//!
//! ```rust
//! use gamepad_core::{Gamepad, HidEndpoint, OutputError, USAGE_GAMEPAD, USAGE_PAGE_GENERIC_DESKTOP};
//!
//! struct Log(Vec<[u8; 4]>);
//!
//! impl HidEndpoint for Log {
//!     fn usage_page(&self) -> u16 { USAGE_PAGE_GENERIC_DESKTOP }
//!     fn usage(&self) -> u16 { USAGE_GAMEPAD }
//!     fn send_report(&mut self, report: &[u8]) -> Result<(), OutputError> {
//!         self.0.push(report.try_into().unwrap());
//!         Ok(())
//!     }
//! }
//!
//! struct NoDelay;
//! impl embedded_hal::delay::DelayNs for NoDelay {
//!     fn delay_ns(&mut self, _ns: u32) {}
//! }
//!
//! let mut gamepad = Gamepad::new([Log(Vec::new())], &mut NoDelay).unwrap();
//! gamepad.press_buttons(&[1, 3]).unwrap();
//! gamepad.press_buttons(&[1, 3]).unwrap(); // unchanged, not sent
//! assert_eq!(gamepad.endpoint().0, [[0, 0, 0, 0], [0b101, 0, 0, 0]]);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod device;
pub mod forward;
pub mod gamepad;
pub mod output;
pub mod panel;
pub mod report;
pub mod types;

// Re-export main types at crate root
pub use device::{find_device, DeviceNotFound, USAGE_GAMEPAD, USAGE_PAGE_GENERIC_DESKTOP};
pub use forward::{ReportForwarder, ReportWriter};
pub use gamepad::{Gamepad, GamepadError, READY_RETRY_DELAY_MS};
pub use output::{HidEndpoint, OutputError};
pub use panel::{render_states, ButtonPanel, RENDER_CAPACITY};
pub use report::GamepadReport;
pub use types::{Buttons, MAX_BUTTONS};
