//! USB HID gamepad endpoint for the RP2040.
//!
//! The gamepad encoder is synchronous, while embassy-usb writes are async.
//! [`UsbHidEndpoint`] bridges the two: it queues reports without blocking,
//! and [`forward_reports`] drains the queue into the HID interrupt endpoint
//! through a [`UsbHidWriter`].

use defmt::{error, info, warn};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_usb::class::hid::{HidWriter, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use gamepad_core::{
    GamepadReport, HidEndpoint, OutputError, ReportForwarder, ReportWriter, USAGE_GAMEPAD,
    USAGE_PAGE_GENERIC_DESKTOP,
};
use portable_atomic::{AtomicBool, Ordering};

use crate::config::{HID_MAX_PACKET_SIZE, HID_POLL_MS, REPORT_QUEUE_DEPTH};

/// USB driver for the RP2040 USB peripheral.
pub type UsbDriver<'d> = Driver<'d, USB>;

/// HID writer sized for one full packet.
pub type GamepadWriter<'d> = HidWriter<'d, UsbDriver<'d>, { HID_MAX_PACKET_SIZE as usize }>;

/// Queue of reports waiting for the host to poll the HID endpoint.
pub type ReportChannel = Channel<CriticalSectionRawMutex, GamepadReport, REPORT_QUEUE_DEPTH>;

/// 32-button gamepad report descriptor.
///
/// One application collection, 32 one-bit buttons, 4-byte input report with
/// no report ID. Bit 0 of byte 0 is button 1.
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (32 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x20, //   Usage Maximum (Button 32)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x20, //   Report Count (32)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// Gamepad endpoint handed to the encoder.
///
/// Sending never waits: reports are refused with [`OutputError::NotReady`]
/// until the host has configured the interface or while the link is down
/// after a failed write, and with
/// [`OutputError::Busy`] while the queue is full.
pub struct UsbHidEndpoint<'a> {
    reports: Sender<'a, CriticalSectionRawMutex, GamepadReport, REPORT_QUEUE_DEPTH>,
    ready: &'a AtomicBool,
}

impl<'a> UsbHidEndpoint<'a> {
    /// Create an endpoint feeding `reports`, gated on `ready`.
    #[must_use]
    pub fn new(
        reports: Sender<'a, CriticalSectionRawMutex, GamepadReport, REPORT_QUEUE_DEPTH>,
        ready: &'a AtomicBool,
    ) -> Self {
        Self { reports, ready }
    }
}

impl HidEndpoint for UsbHidEndpoint<'_> {
    fn usage_page(&self) -> u16 {
        USAGE_PAGE_GENERIC_DESKTOP
    }

    fn usage(&self) -> u16 {
        USAGE_GAMEPAD
    }

    fn send_report(&mut self, report: &[u8]) -> Result<(), OutputError> {
        if !self.ready.load(Ordering::Acquire) {
            return Err(OutputError::NotReady);
        }

        let bytes: [u8; GamepadReport::SIZE] = report.try_into().map_err(|_| OutputError::Io)?;
        self.reports
            .try_send(GamepadReport::from_bytes(bytes))
            .map_err(|_| OutputError::Busy)
    }
}

/// HID interrupt endpoint writer that tracks whether the host is listening.
///
/// `ready` is raised once the host configures the interface and lowered
/// when a write fails, so [`UsbHidEndpoint`] refuses reports while the link
/// is down and the encoder keeps the unsent state.
pub struct UsbHidWriter<'d> {
    writer: GamepadWriter<'d>,
    ready: &'d AtomicBool,
}

impl<'d> UsbHidWriter<'d> {
    /// Create a writer that raises `ready` once the host configures the interface.
    #[must_use]
    pub fn new(writer: GamepadWriter<'d>, ready: &'d AtomicBool) -> Self {
        Self { writer, ready }
    }
}

impl ReportWriter for UsbHidWriter<'_> {
    async fn wait_ready(&mut self) {
        self.writer.ready().await;
        self.ready.store(true, Ordering::Release);
        info!("USB HID ready");
    }

    fn link_lost(&mut self) {
        self.ready.store(false, Ordering::Release);
        warn!("USB HID link lost, waiting for host");
    }

    async fn write(&mut self, report: &GamepadReport) -> Result<(), OutputError> {
        self.writer
            .write(report.as_bytes())
            .await
            .map_err(|e| match e {
                EndpointError::Disabled => OutputError::NotReady,
                _ => OutputError::Io,
            })
    }
}

/// Forward queued reports to the host indefinitely.
///
/// A report whose write fails is kept and written again once the host has
/// configured the interface.
pub async fn forward_reports(
    writer: UsbHidWriter<'_>,
    reports: Receiver<'_, CriticalSectionRawMutex, GamepadReport, REPORT_QUEUE_DEPTH>,
) -> ! {
    let mut forwarder = ReportForwarder::new(writer);

    loop {
        if let Err(e) = forwarder.forward_one(reports.receive()).await {
            error!("HID write failed: {:?}", e);
        }
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut State<'d>,
) -> GamepadWriter<'d> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: HID_POLL_MS,
        max_packet_size: HID_MAX_PACKET_SIZE,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
