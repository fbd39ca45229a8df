//! Mazetrace plays back pathfinding runs on grid mazes and renders them.
//!
//! The public API is engine-oriented:
//!
//! - Obtain a [`Maze`] from a [`MazeService`] (or load one) and show it on a [`RenderTarget`]
//! - [`Engine::start`] a run for an [`Algorithm`]; the engine fetches its [`Step`]s
//! - Call [`Engine::tick`] whenever the previous [`TickOutcome`] says so, or let [`drive`] do it
//!
//! Each tick applies a speed-dependent batch of steps and repaints only the touched cells, which is
//! pixel-identical to a full redraw of the same maze state.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Theme textures.
pub mod assets;
/// Grid-to-canvas projection.
pub mod layout;
/// Wire data model.
pub mod model;
/// Step scheduling.
pub mod playback;
/// Rendering.
pub mod render;
/// Maze service collaborators.
pub mod service;
/// Engine and host loop.
pub mod session;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, GridPos, PixelRect, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{MazeError, MazeResult};

pub use crate::assets::store::{AssetSlot, PreparedImage, ThemeAssets};
pub use crate::layout::projection::Projection;
pub use crate::model::algorithm::Algorithm;
pub use crate::model::config::{ConstraintFlag, MazeConfig};
pub use crate::model::maze::{CellCode, Maze};
pub use crate::model::step::{GridUpdate, Step};
pub use crate::playback::scheduler::{PlaybackState, PlaybackStats, TickOutcome, TickReport};
pub use crate::playback::speed::Speed;
pub use crate::render::backend::{FrameRGBA, RenderTarget};
pub use crate::render::cpu::CpuCanvas;
pub use crate::render::plan::{PaintOp, Renderer};
pub use crate::render::recording::{PaintRecord, RecordingTarget};
pub use crate::service::MazeService;
pub use crate::service::fixture::FixtureMazeService;
#[cfg(feature = "http")]
pub use crate::service::http::{HttpMazeService, HttpServiceOpts};
pub use crate::session::engine::{
    AlgorithmSummary, CompareOutcome, Controls, Engine, EngineOpts, RejectReason, StartOutcome,
};
pub use crate::session::host::{Clock, FRAME_INTERVAL, ManualClock, SystemClock, TickEvent, drive};
