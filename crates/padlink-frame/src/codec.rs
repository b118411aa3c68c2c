use bytes::{BufMut, BytesMut};

use crate::error::{FrameError, Result};
use crate::layout::{NUM_AXES, NUM_BUTTONS, NUM_FULL_BUTTONS};

/// Encoded size of a compact snapshot: 6 axes (i16 LE) + 18 buttons (u8).
pub const SNAPSHOT_SIZE: usize = NUM_AXES * 2 + NUM_BUTTONS;

/// Encoded size of a full-enumeration snapshot:
/// 6 axes (i16 LE) + 21 buttons (u8) + line-feed terminator.
pub const FULL_SNAPSHOT_SIZE: usize = NUM_AXES * 2 + NUM_FULL_BUTTONS + 1;

/// One controller's sampled state in the compact request/reply layout.
///
/// An absent device is the all-zero snapshot; the encoded length never
/// depends on attachment state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PadSnapshot {
    pub axes: [i16; NUM_AXES],
    pub buttons: [u8; NUM_BUTTONS],
}

/// One controller's sampled state over the full button enumeration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FullSnapshot {
    pub axes: [i16; NUM_AXES],
    pub buttons: [u8; NUM_FULL_BUTTONS],
}

/// Encode a compact snapshot into the wire format.
///
/// Wire format (30 bytes, no terminator):
/// ```text
/// ┌──────────────────────────────┬──────────────────────────────┐
/// │ Axes: 6 × i16 LE (12B)       │ Buttons: 18 × u8 (18B)       │
/// │ LX LY RX RY TL TR            │ 0x00 released / 0xFF pressed │
/// └──────────────────────────────┴──────────────────────────────┘
/// ```
pub fn encode_snapshot(snapshot: &PadSnapshot, dst: &mut BytesMut) {
    dst.reserve(SNAPSHOT_SIZE);
    for axis in snapshot.axes {
        dst.put_i16_le(axis);
    }
    dst.put_slice(&snapshot.buttons);
}

/// Decode a compact snapshot from an exact-length buffer.
pub fn decode_snapshot(src: &[u8]) -> Result<PadSnapshot> {
    if src.len() != SNAPSHOT_SIZE {
        return Err(FrameError::BadSnapshotLength {
            len: src.len(),
            expected: SNAPSHOT_SIZE,
        });
    }

    let mut snapshot = PadSnapshot::default();
    for (i, axis) in snapshot.axes.iter_mut().enumerate() {
        *axis = i16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
    }
    snapshot
        .buttons
        .copy_from_slice(&src[NUM_AXES * 2..SNAPSHOT_SIZE]);

    Ok(snapshot)
}

/// Encode a full-enumeration snapshot: all axes, all buttons, newline.
pub fn encode_full_snapshot(snapshot: &FullSnapshot, dst: &mut BytesMut) {
    dst.reserve(FULL_SNAPSHOT_SIZE);
    for axis in snapshot.axes {
        dst.put_i16_le(axis);
    }
    dst.put_slice(&snapshot.buttons);
    dst.put_u8(b'\n');
}

/// Decode a full-enumeration snapshot from an exact-length buffer.
pub fn decode_full_snapshot(src: &[u8]) -> Result<FullSnapshot> {
    if src.len() != FULL_SNAPSHOT_SIZE {
        return Err(FrameError::BadSnapshotLength {
            len: src.len(),
            expected: FULL_SNAPSHOT_SIZE,
        });
    }
    if src[FULL_SNAPSHOT_SIZE - 1] != b'\n' {
        return Err(FrameError::MissingTerminator);
    }

    let mut snapshot = FullSnapshot::default();
    for (i, axis) in snapshot.axes.iter_mut().enumerate() {
        *axis = i16::from_le_bytes([src[i * 2], src[i * 2 + 1]]);
    }
    snapshot
        .buttons
        .copy_from_slice(&src[NUM_AXES * 2..FULL_SNAPSHOT_SIZE - 1]);

    Ok(snapshot)
}
