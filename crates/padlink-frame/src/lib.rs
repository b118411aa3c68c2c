//! Line framing and snapshot wire codec for padlink.
//!
//! This is the protocol layer of the bridge:
//! - [`LineReader`] turns a byte stream into logical lines, preserving every
//!   byte across arbitrary read splits.
//! - [`parse_request`] classifies a line as a controller request or
//!   passthrough data.
//! - [`encode_snapshot`] / [`encode_full_snapshot`] serialize sampled
//!   controller state into the fixed wire layouts.

pub mod codec;
pub mod error;
pub mod layout;
pub mod marker;
pub mod reader;

pub use codec::{
    decode_full_snapshot, decode_snapshot, encode_full_snapshot, encode_snapshot, FullSnapshot,
    PadSnapshot, FULL_SNAPSHOT_SIZE, SNAPSHOT_SIZE,
};
pub use error::{FrameError, Result};
pub use layout::{
    ButtonSlot, PadButton, WireAxis, AXES, BUTTON_SLOTS, FULL_BUTTONS, MAX_PADS, NUM_AXES,
    NUM_BUTTONS, NUM_FULL_BUTTONS, TRIGGER_THRESHOLD,
};
pub use marker::{parse_request, Request, SENTINEL};
pub use reader::{Line, LineReader};
