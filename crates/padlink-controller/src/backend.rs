use padlink_frame::{PadButton, WireAxis};

use crate::error::Result;

/// A source of live controller devices, addressed by bounded index.
///
/// The registry owns handles exclusively; a backend only opens them. This is
/// the seam that keeps the registry testable without hardware.
pub trait PadBackend {
    type Handle: PadHandle;

    /// Pump device state so attachment checks and value reads are current.
    fn refresh(&mut self);

    /// Number of input devices the backend currently enumerates.
    fn num_devices(&self) -> usize;

    /// Whether the device at `index` is an attached game controller.
    fn is_attached(&self, index: usize) -> bool;

    /// Open a fresh handle for the device at `index`.
    fn open(&mut self, index: usize) -> Result<Self::Handle>;
}

/// A live handle to one attached controller.
pub trait PadHandle {
    /// Current value of an axis, signed full scale.
    fn axis(&self, axis: WireAxis) -> i16;

    /// Current pressed state of a button.
    fn button(&self, button: PadButton) -> bool;

    /// Human-readable device name.
    fn name(&self) -> String;
}
