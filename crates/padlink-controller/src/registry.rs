use padlink_frame::{
    ButtonSlot, FullSnapshot, PadSnapshot, WireAxis, AXES, BUTTON_SLOTS, FULL_BUTTONS, MAX_PADS,
    TRIGGER_THRESHOLD,
};

use crate::backend::{PadBackend, PadHandle};

/// Anything that can produce snapshots for a controller index.
///
/// Lets bridge loops run against a fake source in tests.
pub trait SnapshotSource {
    fn sample(&mut self, index: usize) -> PadSnapshot;
    fn sample_full(&mut self, index: usize) -> FullSnapshot;
}

/// Slot table mapping controller indices to exclusively owned device handles.
///
/// Hot-plug policy is eager refresh: every sample re-verifies attachment of
/// the requested slot and reopens it, releasing any previous handle before
/// the new one is stored. A detached or unopenable device samples as the
/// all-zero snapshot, never as an error.
pub struct PadRegistry<B: PadBackend> {
    backend: B,
    slots: [Option<B::Handle>; MAX_PADS],
}

impl<B: PadBackend> PadRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Enumerate currently attached controllers as `(index, name)` pairs.
    pub fn attached_pads(&mut self) -> Vec<(usize, String)> {
        self.backend.refresh();

        let count = self.backend.num_devices().min(MAX_PADS);
        (0..count)
            .filter_map(|index| {
                let handle = self.refresh_slot(index)?;
                Some((index, handle.name()))
            })
            .collect()
    }

    /// Re-verify and (re)open the slot, returning its live handle if the
    /// device is attached.
    fn refresh_slot(&mut self, index: usize) -> Option<&B::Handle> {
        if index >= MAX_PADS {
            // Defensive: the request parser already bounds indices.
            tracing::warn!(index, "controller index out of range");
            return None;
        }

        if !self.backend.is_attached(index) {
            if self.slots[index].take().is_some() {
                tracing::info!(index, "controller detached");
            }
            return None;
        }

        // Release before replace: the slot owns at most one handle at a time.
        self.slots[index] = None;
        match self.backend.open(index) {
            Ok(handle) => {
                self.slots[index] = Some(handle);
                self.slots[index].as_ref()
            }
            Err(err) => {
                tracing::warn!(index, error = %err, "failed opening controller");
                None
            }
        }
    }
}

impl<B: PadBackend> SnapshotSource for PadRegistry<B> {
    fn sample(&mut self, index: usize) -> PadSnapshot {
        self.backend.refresh();
        match self.refresh_slot(index) {
            Some(handle) => compact_snapshot(handle),
            None => PadSnapshot::default(),
        }
    }

    fn sample_full(&mut self, index: usize) -> FullSnapshot {
        self.backend.refresh();
        match self.refresh_slot(index) {
            Some(handle) => full_snapshot(handle),
            None => FullSnapshot::default(),
        }
    }
}

fn compact_snapshot(handle: &impl PadHandle) -> PadSnapshot {
    let mut snapshot = PadSnapshot::default();
    for (value, axis) in snapshot.axes.iter_mut().zip(AXES) {
        *value = handle.axis(axis);
    }
    for (value, slot) in snapshot.buttons.iter_mut().zip(BUTTON_SLOTS) {
        *value = match slot {
            ButtonSlot::Pad(button) => pressed(handle.button(button)),
            ButtonSlot::TriggerLeft => trigger_pressed(handle.axis(WireAxis::TriggerLeft)),
            ButtonSlot::TriggerRight => trigger_pressed(handle.axis(WireAxis::TriggerRight)),
            ButtonSlot::Reserved => 0x00,
        };
    }
    snapshot
}

fn full_snapshot(handle: &impl PadHandle) -> FullSnapshot {
    let mut snapshot = FullSnapshot::default();
    for (value, axis) in snapshot.axes.iter_mut().zip(AXES) {
        *value = handle.axis(axis);
    }
    for (value, button) in snapshot.buttons.iter_mut().zip(FULL_BUTTONS) {
        *value = pressed(handle.button(button));
    }
    snapshot
}

fn pressed(down: bool) -> u8 {
    if down {
        0xFF
    } else {
        0x00
    }
}

fn trigger_pressed(value: i16) -> u8 {
    pressed(value > TRIGGER_THRESHOLD)
}
