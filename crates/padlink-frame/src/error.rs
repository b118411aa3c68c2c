/// Errors that can occur in the framing and codec layer.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An encoded snapshot has the wrong length.
    #[error("bad snapshot length ({len} bytes, expected {expected})")]
    BadSnapshotLength { len: usize, expected: usize },

    /// An encoded snapshot is missing its terminator byte.
    #[error("snapshot missing line-feed terminator")]
    MissingTerminator,

    /// An I/O error occurred while reading or writing the stream.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
