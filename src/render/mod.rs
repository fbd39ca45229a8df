//! Maze rendering.
//!
//! [`plan::Renderer`] turns maze state into [`plan::PaintOp`] lists; a [`backend::RenderTarget`]
//! executes them. Full redraws and per-cell repaints go through the same palette and op sequence.

/// Render target trait and frame type.
pub mod backend;
/// `vello_cpu` raster canvas.
pub mod cpu;
/// Fallback marker letters.
pub mod glyph;
/// Cell and marker styles.
pub mod palette;
/// Paint op planning for full and incremental redraws.
pub mod plan;
/// Recording target for tests and debugging.
pub mod recording;
