//! Boundary data model: mazes, solver steps, generation config and algorithm metadata.
//!
//! Everything here is `serde`-compatible with the maze service wire format.

/// Algorithm identifiers and display metadata.
pub mod algorithm;
/// Maze generation parameters.
pub mod config;
/// Maze grid and cell codes.
pub mod maze;
/// Solver steps and grid deltas.
pub mod step;
