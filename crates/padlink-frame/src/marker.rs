//! Request-marker classification.
//!
//! A request is the exact byte sequence `☉<digit>☉\n` (8 bytes) selecting a
//! controller slot, or the bare sync marker `☉\n` (4 bytes) asking for a
//! full-enumeration dump. Anything else is opaque passthrough data.

use crate::layout::MAX_PADS;

/// The sentinel glyph bracketing a device index (UTF-8, 3 bytes).
pub const SENTINEL: &[u8] = "☉".as_bytes();

/// Total length of a sample-request marker.
pub const SAMPLE_MARKER_LEN: usize = SENTINEL.len() * 2 + 2;

/// Total length of a full-state sync marker.
pub const FULL_MARKER_LEN: usize = SENTINEL.len() + 1;

/// A recognized consumer request.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Request {
    /// Sample one controller slot, reply with the compact snapshot.
    Sample { pad: usize },
    /// Reply with the full-enumeration snapshot.
    FullState,
}

/// Classify a line as a request, or `None` for passthrough.
///
/// Pure and total: length or byte mismatches and out-of-range indices are
/// classification misses, never errors.
pub fn parse_request(line: &[u8]) -> Option<Request> {
    match line.len() {
        SAMPLE_MARKER_LEN => {
            let (head, rest) = line.split_at(SENTINEL.len());
            let (digit, tail) = rest.split_first()?;
            if head != SENTINEL || &tail[..SENTINEL.len()] != SENTINEL || tail[SENTINEL.len()] != b'\n' {
                return None;
            }

            let pad = digit.checked_sub(b'0')? as usize;
            if pad >= MAX_PADS {
                return None;
            }
            Some(Request::Sample { pad })
        }
        FULL_MARKER_LEN => {
            let (head, tail) = line.split_at(SENTINEL.len());
            (head == SENTINEL && tail == b"\n").then_some(Request::FullState)
        }
        _ => None,
    }
}
