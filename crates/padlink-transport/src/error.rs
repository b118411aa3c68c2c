use std::path::PathBuf;

/// Errors that can occur while establishing or tearing down channels.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Failed to create a FIFO at the given path.
    #[error("failed to create FIFO at {path}: {source}")]
    CreateFifo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to open an existing FIFO endpoint.
    #[error("failed to open FIFO at {path}: {source}")]
    OpenFifo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The consumer command line was empty.
    #[error("consumer command is empty")]
    EmptyCommand,

    /// Failed to spawn the consumer process.
    #[error("failed to spawn consumer {program:?}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// A spawned consumer came back without piped stdio.
    #[error("consumer stdio was not piped")]
    MissingStdio,

    /// Failed to install the interrupt cleanup hook.
    #[error("failed to install signal hook: {0}")]
    SignalHook(String),

    /// An I/O error occurred on a channel endpoint.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChannelError>;
