//! Pad source trait.

use embedded_hal::delay::DelayNs;
use psx_proto::{AckTimeout, ControllerFrame, PsxBus, PsxController};

/// Trait for sources of raw controller frames.
///
/// Abstracts the controller link so the polling loop can run against
/// recorded frames in tests.
pub trait PadSource {
    /// Run one polling transaction and return the raw frame.
    fn read_frame(&mut self) -> Result<ControllerFrame, AckTimeout>;
}

impl<B: PsxBus, D: DelayNs> PadSource for PsxController<B, D> {
    fn read_frame(&mut self) -> Result<ControllerFrame, AckTimeout> {
        self.run_transaction()
    }
}

impl<T: PadSource + ?Sized> PadSource for &mut T {
    fn read_frame(&mut self) -> Result<ControllerFrame, AckTimeout> {
        (**self).read_frame()
    }
}
