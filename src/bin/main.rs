#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::{debug, info, unwrap, warn};
use defmt_rtt as _;
use embassy_executor::Executor;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_time::{Delay, Timer};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig, UsbDevice};
use pico_hid_gamepad::config::{
    BUTTON_COUNT, BUTTON_MAP, CORE1_STACK_SIZE, HEARTBEAT_MS, POLL_INTERVAL_MS, USB_MANUFACTURER,
    USB_MAX_POWER_MA, USB_PID, USB_PRODUCT, USB_SERIAL, USB_VID,
};
use pico_hid_gamepad::{
    button_pin, configure_usb_hid, forward_reports, render_states, ButtonInputs, ButtonPanel,
    Gamepad, ReportChannel, UsbDriver, UsbHidEndpoint, UsbHidWriter,
};
use portable_atomic::AtomicBool;
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

/// Reports from the button loop (Core 1) to the USB writer (Core 0).
static REPORTS: ReportChannel = ReportChannel::new();

/// Set once the host has configured the HID interface.
static USB_READY: AtomicBool = AtomicBool::new(false);

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

static CORE1_STACK: StaticCell<Stack<CORE1_STACK_SIZE>> = StaticCell::new();
static EXECUTOR0: StaticCell<Executor> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

#[entry]
fn main() -> ! {
    info!("Pico HID Gamepad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Buttons (GP15 is not wired) ---
    let inputs = ButtonInputs::new([
        button_pin(p.PIN_0),
        button_pin(p.PIN_1),
        button_pin(p.PIN_2),
        button_pin(p.PIN_3),
        button_pin(p.PIN_4),
        button_pin(p.PIN_5),
        button_pin(p.PIN_6),
        button_pin(p.PIN_7),
        button_pin(p.PIN_8),
        button_pin(p.PIN_9),
        button_pin(p.PIN_10),
        button_pin(p.PIN_11),
        button_pin(p.PIN_12),
        button_pin(p.PIN_13),
        button_pin(p.PIN_14),
        button_pin(p.PIN_16),
        button_pin(p.PIN_17),
        button_pin(p.PIN_18),
        button_pin(p.PIN_19),
        button_pin(p.PIN_20),
        button_pin(p.PIN_21),
    ]);
    let panel = unwrap!(ButtonPanel::new(BUTTON_MAP));
    let endpoint = UsbHidEndpoint::new(REPORTS.sender(), &USB_READY);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some(USB_MANUFACTURER);
    usb_config.product = Some(USB_PRODUCT);
    usb_config.serial_number = Some(USB_SERIAL);
    usb_config.max_power = USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = UsbHidWriter::new(configure_usb_hid(&mut builder, hid_state), &USB_READY);

    // Build the USB device
    let usb_device = builder.build();

    // On-board LED (heartbeat)
    let led = Output::new(p.PIN_25, Level::Low);

    spawn_core1(p.CORE1, CORE1_STACK.init(Stack::new()), move || {
        let executor1 = EXECUTOR1.init(Executor::new());
        executor1.run(|spawner| spawner.spawn(gamepad_task(inputs, panel, endpoint).unwrap()))
    });

    let executor0 = EXECUTOR0.init(Executor::new());
    executor0.run(|spawner| {
        spawner.spawn(usb_task(usb_device).unwrap());
        spawner.spawn(hid_writer_task(hid_writer).unwrap());
        spawner.spawn(heartbeat_task(led).unwrap());
        info!("Pico HID Gamepad initialized, waiting for host...");
    })
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: UsbDevice<'static, UsbDriver<'static>>) {
    device.run().await;
}

/// HID writer task - forwards queued reports to the host.
#[embassy_executor::task]
async fn hid_writer_task(writer: UsbHidWriter<'static>) {
    forward_reports(writer, REPORTS.receiver()).await
}

/// Heartbeat task - blinks the on-board LED while the firmware is alive.
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.toggle();
        Timer::after_millis(HEARTBEAT_MS).await;
    }
}

/// Button task - samples the inputs and mirrors them onto the gamepad.
#[embassy_executor::task]
async fn gamepad_task(
    inputs: ButtonInputs<'static, BUTTON_COUNT>,
    panel: ButtonPanel<BUTTON_COUNT>,
    endpoint: UsbHidEndpoint<'static>,
) {
    // Blocks this core for up to one retry delay while the host enumerates us.
    let mut gamepad = unwrap!(Gamepad::new([endpoint], &mut Delay));
    info!("Gamepad ready, polling {=usize} buttons", BUTTON_COUNT);

    let mut previous = [false; BUTTON_COUNT];
    loop {
        let states = inputs.read();
        if states != previous {
            debug!("{=str}", render_states(&states).as_str());
            previous = states;
        }

        // A refused report is retried on the next poll.
        if let Err(e) = panel.apply(&mut gamepad, &states) {
            warn!("Report not sent: {:?}", e);
        }

        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}
