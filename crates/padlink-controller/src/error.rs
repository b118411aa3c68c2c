/// Errors that can occur in the device backend.
#[derive(Debug, thiserror::Error)]
pub enum PadError {
    /// Backend initialization failed.
    #[error("controller backend initialization failed: {0}")]
    Init(String),

    /// Opening a device handle failed.
    #[error("failed opening controller {index}: {message}")]
    Open { index: usize, message: String },
}

pub type Result<T> = std::result::Result<T, PadError>;
