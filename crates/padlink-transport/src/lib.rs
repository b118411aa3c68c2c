//! Channel lifecycle for padlink.
//!
//! Two ways to reach a consumer that cannot read input devices itself:
//! - [`ConsumerProcess`]: spawn it directly and bridge its standard streams.
//! - [`FifoPair`]: advertise a pair of named FIFOs for a consumer launched
//!   by the operator, with reconnect support.
//!
//! Every resource acquired here is released on every exit path: pipes close
//! and children are reaped on drop, FIFO paths are unlinked on drop and from
//! the interrupt hook.

pub mod error;
pub mod fifo;
pub mod process;

pub use error::{ChannelError, Result};
pub use fifo::{FifoChannel, FifoPair};
pub use process::{ConsumerChannel, ConsumerProcess};
