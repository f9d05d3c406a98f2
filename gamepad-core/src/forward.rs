//! Forwarding queued reports to an async HID writer.
//!
//! The [`Gamepad`](crate::Gamepad) treats a report as sent once its endpoint
//! accepts it. When the endpoint only queues reports, a later write can still
//! fail (bus reset, unplug). [`ReportForwarder`] keeps such a report and
//! writes it again once the host has configured the interface, so the host
//! ends up with the state the encoder believes it has.

use core::future::Future;

use crate::output::OutputError;
use crate::report::GamepadReport;

/// Async writer for the HID interrupt endpoint.
pub trait ReportWriter {
    /// Wait until the host has configured the interface.
    fn wait_ready(&mut self) -> impl Future<Output = ()>;

    /// Called after a failed write, before waiting for the host again.
    fn link_lost(&mut self);

    /// Write one report to the host.
    fn write(&mut self, report: &GamepadReport) -> impl Future<Output = Result<(), OutputError>>;
}

/// Moves reports from a queue to a [`ReportWriter`], resending after link loss.
pub struct ReportForwarder<W> {
    writer: W,
    ready: bool,
    pending: Option<GamepadReport>,
}

impl<W: ReportWriter> ReportForwarder<W> {
    /// Create a forwarder; the first call waits for the host.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            ready: false,
            pending: None,
        }
    }

    /// Forward one report.
    ///
    /// A report kept from a failed write goes first and `next` is dropped
    /// unpolled; otherwise the report comes from `next`. On a write error
    /// the report is kept, the writer is told the link is lost, and the
    /// error is returned.
    pub async fn forward_one<F>(&mut self, next: F) -> Result<(), OutputError>
    where
        F: Future<Output = GamepadReport>,
    {
        if !self.ready {
            self.writer.wait_ready().await;
            self.ready = true;
        }

        let report = match self.pending.take() {
            Some(report) => report,
            None => next.await,
        };

        if let Err(e) = self.writer.write(&report).await {
            self.pending = Some(report);
            self.ready = false;
            self.writer.link_lost();
            return Err(e);
        }
        Ok(())
    }

    /// Report kept from a failed write, if any.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<&GamepadReport> {
        self.pending.as_ref()
    }

    /// Get a reference to the writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::types::Buttons;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use std::vec;
    use std::vec::Vec;

    #[derive(Default)]
    struct MockWriter {
        written: Vec<GamepadReport>,
        fail_next: usize,
        ready_waits: usize,
        links_lost: usize,
    }

    impl ReportWriter for MockWriter {
        fn wait_ready(&mut self) -> impl Future<Output = ()> {
            self.ready_waits += 1;
            core::future::ready(())
        }

        fn link_lost(&mut self) {
            self.links_lost += 1;
        }

        fn write(&mut self, report: &GamepadReport) -> impl Future<Output = Result<(), OutputError>> {
            let result = if self.fail_next > 0 {
                self.fail_next -= 1;
                Err(OutputError::NotReady)
            } else {
                self.written.push(*report);
                Ok(())
            };
            core::future::ready(result)
        }
    }

    // Helper to run a future to completion (simple blocking executor)
    fn block_on<F: Future>(mut f: F) -> F::Output {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);

        // SAFETY: We don't move f after pinning
        let mut f = unsafe { Pin::new_unchecked(&mut f) };

        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => result,
            Poll::Pending => panic!("Mock future returned Pending unexpectedly"),
        }
    }

    fn report(raw: u32) -> GamepadReport {
        GamepadReport::from(Buttons(raw))
    }

    #[test]
    fn test_waits_for_host_once() {
        let mut forwarder = ReportForwarder::new(MockWriter::default());

        block_on(forwarder.forward_one(core::future::ready(report(0b100)))).unwrap();
        block_on(forwarder.forward_one(core::future::ready(report(0)))).unwrap();

        assert_eq!(forwarder.writer().written, vec![report(0b100), report(0)]);
        assert_eq!(forwarder.writer().ready_waits, 1);
        assert!(forwarder.pending().is_none());
    }

    #[test]
    fn test_held_button_survives_bus_reset() {
        let writer = MockWriter {
            fail_next: 1,
            ..MockWriter::default()
        };
        let mut forwarder = ReportForwarder::new(writer);

        // Button 3 held; the write fails during a bus reset.
        let result = block_on(forwarder.forward_one(core::future::ready(report(0b100))));
        assert_eq!(result, Err(OutputError::NotReady));
        assert_eq!(forwarder.pending(), Some(&report(0b100)));
        assert_eq!(forwarder.writer().links_lost, 1);

        // After re-enumeration the kept report goes out without touching the queue.
        let untouched = core::future::poll_fn(|_| -> Poll<GamepadReport> {
            panic!("queue polled while a report was pending")
        });
        block_on(forwarder.forward_one(untouched)).unwrap();

        assert_eq!(forwarder.writer().written, vec![report(0b100)]);
        assert_eq!(forwarder.writer().ready_waits, 2);
        assert!(forwarder.pending().is_none());
    }

    #[test]
    fn test_repeated_failures_keep_report() {
        let writer = MockWriter {
            fail_next: 2,
            ..MockWriter::default()
        };
        let mut forwarder = ReportForwarder::new(writer);

        assert!(block_on(forwarder.forward_one(core::future::ready(report(1)))).is_err());
        assert!(block_on(forwarder.forward_one(core::future::ready(report(2)))).is_err());
        block_on(forwarder.forward_one(core::future::ready(report(3)))).unwrap();
        block_on(forwarder.forward_one(core::future::ready(report(4)))).unwrap();

        // Reports offered while one was pending were never taken from the queue.
        assert_eq!(forwarder.writer().written, vec![report(1), report(4)]);
        assert_eq!(forwarder.writer().links_lost, 2);
        assert_eq!(forwarder.writer().ready_waits, 3);
    }
}
