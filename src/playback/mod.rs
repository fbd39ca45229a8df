//! Step playback: speed mapping and the cooperative tick scheduler.

/// Tick scheduler and run state machine.
pub mod scheduler;
/// Playback speed and its batch/delay mapping.
pub mod speed;
