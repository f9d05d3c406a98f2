//! Compile-time configuration for the button board.

/// Number of button inputs wired on the board.
pub const BUTTON_COUNT: usize = 21;

/// Button number driven by each input, in the order the pins are sampled.
///
/// Pins are GP0-GP14 then GP16-GP21 (GP15 is not wired). Swap entries here
/// to fix a miswired button without touching the sampling code.
pub const BUTTON_MAP: [u8; BUTTON_COUNT] = [
    1, 2, 3, 4, 5, 6, 7, //
    8, 9, 10, 11, 12, 13, 14, //
    15, 16, 17, 18, 19, 20, 21,
];

/// Input sampling period.
pub const POLL_INTERVAL_MS: u64 = 10;

/// Heartbeat LED half-period.
pub const HEARTBEAT_MS: u64 = 500;

/// Reports queued between the button loop and the USB writer.
pub const REPORT_QUEUE_DEPTH: usize = 4;

/// Stack size for Core 1 in bytes.
pub const CORE1_STACK_SIZE: usize = 4096;

// USB device identity (pid.codes test VID/PID)
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;
pub const USB_MANUFACTURER: &str = "Rust Gamepad";
pub const USB_PRODUCT: &str = "Pico HID Gamepad";
pub const USB_SERIAL: &str = "001";
pub const USB_MAX_POWER_MA: u16 = 100;

/// HID interrupt endpoint polling interval.
pub const HID_POLL_MS: u8 = 1;

/// HID interrupt endpoint packet size.
pub const HID_MAX_PACKET_SIZE: u16 = 8;
