use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, info};

use crate::error::{ChannelError, Result};

/// Paths registered for unlinking from the signal handler. Set once before
/// any handler is armed, so the handler only ever performs an atomic load
/// and a pointer read.
static CLEANUP_PATHS: OnceLock<[CString; 2]> = OnceLock::new();

const TERMINATION_SIGNALS: [libc::c_int; 3] = [libc::SIGINT, libc::SIGTERM, libc::SIGHUP];

extern "C" fn cleanup_fifos_and_reraise(signal: libc::c_int) {
    remove_registered_fifos();
    // SAFETY: signal() and raise() are async-signal-safe.
    unsafe {
        libc::signal(signal, libc::SIG_DFL);
        libc::raise(signal);
    }
}

/// Unlink every path registered by [`FifoPair::install_signal_cleanup`].
/// Restricted to async-signal-safe calls.
fn remove_registered_fifos() {
    if let Some(paths) = CLEANUP_PATHS.get() {
        for path in paths {
            // SAFETY: the registered CString stays alive for the rest of
            // the process.
            unsafe { libc::unlink(path.as_ptr()) };
        }
    }
}

/// A pair of named FIFOs advertised to an external consumer.
///
/// The clock FIFO carries requests from the consumer, the data FIFO carries
/// encoded snapshots back. Both are created with owner-only permissions and
/// removed again on drop; a creation failure of the second path rolls back
/// the first before the error surfaces.
#[derive(Debug)]
pub struct FifoPair {
    clock: PathBuf,
    data: PathBuf,
    cleanup_on_drop: bool,
}

impl FifoPair {
    /// Permission mode for created FIFOs (owner read/write only).
    pub const FIFO_MODE: libc::mode_t = 0o600;

    /// Create both FIFOs. Existing paths are refused, never reused.
    pub fn create(clock: impl AsRef<Path>, data: impl AsRef<Path>) -> Result<Self> {
        let clock = clock.as_ref().to_path_buf();
        let data = data.as_ref().to_path_buf();

        mkfifo(&clock)?;
        if let Err(err) = mkfifo(&data) {
            // Partial construction must not leak the sibling endpoint.
            let _ = std::fs::remove_file(&clock);
            return Err(err);
        }

        info!(clock = %clock.display(), data = %data.display(), "FIFO pair created");

        Ok(Self {
            clock,
            data,
            cleanup_on_drop: true,
        })
    }

    /// Block until a consumer attaches to both endpoints.
    ///
    /// The read (clock) end is opened first, matching the consumer's own
    /// open order; opening in the opposite order would deadlock, with each
    /// side blocked waiting for a peer on its first open.
    pub fn connect(&self) -> Result<FifoChannel> {
        let requests = File::open(&self.clock).map_err(|source| ChannelError::OpenFifo {
            path: self.clock.clone(),
            source,
        })?;
        let replies = OpenOptions::new().write(true).open(&self.data).map_err(|source| {
            ChannelError::OpenFifo {
                path: self.data.clone(),
                source,
            }
        })?;

        debug!("consumer attached to FIFO pair");

        Ok(FifoChannel { requests, replies })
    }

    /// Path of the request (clock) FIFO.
    pub fn clock_path(&self) -> &Path {
        &self.clock
    }

    /// Path of the reply (data) FIFO.
    pub fn data_path(&self) -> &Path {
        &self.data
    }

    /// Remove the FIFO paths when a termination signal (SIGINT, SIGTERM or
    /// SIGHUP) arrives.
    ///
    /// Drop does not run on signal death, so the handler unlinks the paths
    /// itself, then restores the default disposition and re-raises the
    /// delivered signal so the exit status still reflects it.
    pub fn install_signal_cleanup(&self) -> Result<()> {
        let paths = [
            path_cstring(&self.clock).map_err(|err| ChannelError::SignalHook(err.to_string()))?,
            path_cstring(&self.data).map_err(|err| ChannelError::SignalHook(err.to_string()))?,
        ];
        CLEANUP_PATHS
            .set(paths)
            .map_err(|_| ChannelError::SignalHook("cleanup hook already installed".to_owned()))?;

        for signal in TERMINATION_SIGNALS {
            // SAFETY: the handler only calls async-signal-safe functions.
            let previous =
                unsafe { libc::signal(signal, cleanup_fifos_and_reraise as libc::sighandler_t) };
            if previous == libc::SIG_ERR {
                return Err(ChannelError::SignalHook(
                    std::io::Error::last_os_error().to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Drop for FifoPair {
    fn drop(&mut self) {
        if self.cleanup_on_drop {
            for path in [&self.clock, &self.data] {
                debug!(path = %path.display(), "removing FIFO");
                let _ = std::fs::remove_file(path);
            }
        }
    }
}

/// A connected FIFO channel: requests in, replies out.
pub struct FifoChannel {
    pub requests: File,
    pub replies: File,
}

fn path_cstring(path: &Path) -> std::io::Result<CString> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path contains a NUL byte")
    })
}

fn mkfifo(path: &Path) -> Result<()> {
    let cpath = path_cstring(path).map_err(|source| ChannelError::CreateFifo {
        path: path.to_path_buf(),
        source,
    })?;

    // SAFETY: cpath is a valid NUL-terminated string for the duration of
    // the call.
    let rc = unsafe { libc::mkfifo(cpath.as_ptr(), FifoPair::FIFO_MODE) };
    if rc != 0 {
        return Err(ChannelError::CreateFifo {
            path: path.to_path_buf(),
            source: std::io::Error::last_os_error(),
        });
    }
    Ok(())
}
