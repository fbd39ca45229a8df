//! Session-oriented engine API.
//!
//! [`engine::Engine`] owns all mutable state; [`host::drive`] is a blocking host loop for
//! headless playback.

/// The engine: maze, playback, theme and render target.
pub mod engine;
/// Clock abstraction and host tick loop.
pub mod host;
