//! HID endpoint trait and transport error types.

/// Error type for transport operations on a HID endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
    /// Endpoint busy.
    Busy,
}

impl core::fmt::Display for OutputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            OutputError::Io => "HID transport I/O error",
            OutputError::NotReady => "HID transport not ready",
            OutputError::Busy => "HID endpoint busy",
        };
        f.write_str(msg)
    }
}

/// A HID transmission channel exposed by the host platform.
///
/// An endpoint advertises the usage page and usage of its report
/// descriptor so that [`find_device`](crate::find_device) can pick the
/// gamepad out of a composite device.
///
/// # `no_std` Compatibility
///
/// Implementations must not block indefinitely and must not allocate.
pub trait HidEndpoint {
    /// HID usage page declared by the endpoint's report descriptor.
    fn usage_page(&self) -> u16;

    /// HID usage declared by the endpoint's report descriptor.
    fn usage(&self) -> u16;

    /// Whether the endpoint can transmit input reports.
    fn can_send(&self) -> bool {
        true
    }

    /// Transmit one input report to the host.
    fn send_report(&mut self, report: &[u8]) -> Result<(), OutputError>;
}

impl<T: HidEndpoint + ?Sized> HidEndpoint for &mut T {
    #[inline]
    fn usage_page(&self) -> u16 {
        (**self).usage_page()
    }

    #[inline]
    fn usage(&self) -> u16 {
        (**self).usage()
    }

    #[inline]
    fn can_send(&self) -> bool {
        (**self).can_send()
    }

    #[inline]
    fn send_report(&mut self, report: &[u8]) -> Result<(), OutputError> {
        (**self).send_report(report)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_output_error_display() {
        assert_eq!(OutputError::Io.to_string(), "HID transport I/O error");
        assert_eq!(OutputError::NotReady.to_string(), "HID transport not ready");
        assert_eq!(OutputError::Busy.to_string(), "HID endpoint busy");
    }
}
