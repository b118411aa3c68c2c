//! The request-driven bridge loop: read a line, classify it, and either
//! answer with an encoded snapshot or pass it through untouched.

use std::io::{Read, Write};

use bytes::BytesMut;

use padlink_controller::SnapshotSource;
use padlink_frame::{
    encode_full_snapshot, encode_snapshot, parse_request, FrameError, LineReader, Request,
    FULL_SNAPSHOT_SIZE, SNAPSHOT_SIZE,
};

/// Length limit for one logical line. Markers are 8 bytes at most, so any
/// truncated line is passthrough by construction.
const MAX_LINE: usize = 512;

/// The full-state sync marker carries no index; it samples the first slot.
const FULL_STATE_PAD: usize = 0;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Reading from the request stream failed.
    #[error("request stream failed: {0}")]
    Read(#[from] FrameError),

    /// Writing a reply or passthrough bytes failed.
    #[error("reply stream failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Run one bridge connection to completion.
///
/// Returns `Ok(())` when the consumer closes the request stream; any stream
/// fault is fatal to the connection and surfaces as an error. Unrecognized
/// lines (including every piece of an over-long line) are forwarded verbatim
/// to `passthrough`.
pub fn run_bridge<R, W, P, S>(
    requests: R,
    mut replies: W,
    mut passthrough: P,
    source: &mut S,
) -> Result<(), BridgeError>
where
    R: Read,
    W: Write,
    P: Write,
    S: SnapshotSource + ?Sized,
{
    let mut reader = LineReader::new(requests);
    let mut scratch = BytesMut::with_capacity(FULL_SNAPSHOT_SIZE.max(SNAPSHOT_SIZE));
    let mut continuation = false;

    while let Some(line) = reader.read_line(MAX_LINE)? {
        // A line that continues a truncated predecessor can never be a
        // request, even if its bytes happen to match the marker.
        let request = if continuation {
            None
        } else {
            parse_request(&line.bytes)
        };
        continuation = line.truncated;

        match request {
            Some(Request::Sample { pad }) => {
                tracing::debug!(pad, "sampling controller");
                let snapshot = source.sample(pad);
                scratch.clear();
                encode_snapshot(&snapshot, &mut scratch);
                replies.write_all(&scratch)?;
                replies.flush()?;
            }
            Some(Request::FullState) => {
                tracing::debug!(pad = FULL_STATE_PAD, "sampling full controller state");
                let snapshot = source.sample_full(FULL_STATE_PAD);
                scratch.clear();
                encode_full_snapshot(&snapshot, &mut scratch);
                replies.write_all(&scratch)?;
                replies.flush()?;
            }
            None => {
                passthrough.write_all(&line.bytes)?;
                passthrough.flush()?;
            }
        }
    }

    tracing::info!("request stream closed");
    Ok(())
}
