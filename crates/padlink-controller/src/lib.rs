//! Device layer for padlink: a backend seam over the SDL2 game-controller
//! API and a hot-plug-aware slot registry.
//!
//! The registry is the only owner of device handles. Sampling a slot
//! re-verifies attachment first, so a handle is never queried after its
//! device has detached.

pub mod backend;
pub mod error;
pub mod registry;
pub mod sdl;

pub use backend::{PadBackend, PadHandle};
pub use error::{PadError, Result};
pub use registry::{PadRegistry, SnapshotSource};
pub use sdl::{SdlBackend, SdlPad};
