use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::store::{AssetSlot, PreparedImage, ThemeAssets};
use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{MazeError, MazeResult};
use crate::layout::projection::Projection;
use crate::model::algorithm::Algorithm;
use crate::model::config::MazeConfig;
use crate::model::maze::Maze;
use crate::model::step::validate_steps;
use crate::playback::scheduler::{
    Playback, PlaybackState, PlaybackStats, TickOutcome, TickReport,
};
use crate::playback::speed::Speed;
use crate::render::backend::RenderTarget;
use crate::render::palette::CANVAS_CLEAR;
use crate::render::plan::{PaintOp, Renderer};
use crate::service::MazeService;

/// Options controlling an [`Engine`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Initial playback speed.
    pub speed: Speed,
    /// Straight-alpha RGBA color outside the grid region.
    pub clear_rgba: [u8; 4],
    /// Directory holding theme textures. `None` renders with flat fills only.
    pub theme_dir: Option<PathBuf>,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            speed: Speed::default(),
            clear_rgba: CANVAS_CLEAR.to_array(),
            theme_dir: None,
        }
    }
}

impl EngineOpts {
    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> MazeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open engine opts '{}'", path.display()))?;
        let reader = BufReader::new(f);
        serde_json::from_reader(reader)
            .map_err(|e| MazeError::serde(format!("{}: {e}", path.display())))
    }
}

/// Why a control request was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// A run is active, or its tick chain has not yet observed the end.
    PlaybackActive,
    /// No maze has been generated or loaded.
    NoMaze,
}

/// Outcome of a control request that may be refused without being an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// The request took effect.
    Accepted,
    /// The request was ignored; nothing changed.
    Rejected(RejectReason),
}

/// Which UI controls are currently usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    /// "Generate" is allowed.
    pub generate_enabled: bool,
    /// "Run" and "Run All" are allowed.
    pub run_enabled: bool,
    /// "Cancel" has something to stop.
    pub cancel_enabled: bool,
}

/// One row of a Run All comparison.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AlgorithmSummary {
    /// Algorithm that was solved.
    pub algorithm: Algorithm,
    /// Whether the end was reached.
    pub success: bool,
    /// Path length on success.
    pub path_length: Option<u64>,
    /// Nodes expanded by the end of the run.
    pub nodes_expanded: u64,
    /// Number of steps the solver emitted.
    pub steps: usize,
    /// Failure message when the solve call failed; the other fields are zeroed.
    pub error: Option<String>,
}

impl AlgorithmSummary {
    fn failed(algorithm: Algorithm, err: &MazeError) -> Self {
        Self {
            algorithm,
            success: false,
            path_length: None,
            nodes_expanded: 0,
            steps: 0,
            error: Some(err.to_string()),
        }
    }
}

/// Outcome of [`Engine::compare_all`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompareOutcome {
    /// One row per algorithm, in [`Algorithm::ALL`] order.
    Completed(Vec<AlgorithmSummary>),
    /// Comparison was not started.
    Rejected(RejectReason),
}

/// Owns the maze, the playback session, the theme and the render target.
///
/// There is exactly one engine per surface, so "at most one active session" holds by construction:
/// [`Engine::start`] refuses to arm a new run until the previous tick chain has observed its end.
pub struct Engine<S, T> {
    service: S,
    target: T,
    renderer: Renderer,
    assets: ThemeAssets,
    maze: Option<Maze>,
    playback: Playback,
    speed: Speed,
    algorithm: Algorithm,
    observed: PlaybackStats,
}

impl<S, T> std::fmt::Debug for Engine<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("maze", &self.maze.as_ref().map(|m| (m.width, m.height)))
            .field("state", &self.playback.state())
            .field("cursor", &self.playback.cursor())
            .field("speed", &self.speed)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl<S: MazeService, T: RenderTarget> Engine<S, T> {
    /// Build an engine. Theme textures found under `opts.theme_dir` are loaded; missing ones fall
    /// back to flat fills.
    pub fn new(service: S, target: T, opts: EngineOpts) -> Self {
        let [r, g, b, a] = opts.clear_rgba;
        let mut assets = ThemeAssets::new();
        if let Some(dir) = &opts.theme_dir {
            let loaded = assets.load_dir(dir);
            tracing::debug!(dir = %dir.display(), loaded = loaded.len(), "theme assets loaded");
        }
        Self {
            service,
            target,
            renderer: Renderer::new(Rgba8Premul::from_straight_rgba(r, g, b, a)),
            assets,
            maze: None,
            playback: Playback::new(),
            speed: opts.speed,
            algorithm: Algorithm::Bfs,
            observed: PlaybackStats::default(),
        }
    }

    /// Current maze, if any.
    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    /// Borrow the render target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutably borrow the render target.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Borrow the maze service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Loaded theme textures.
    pub fn assets(&self) -> &ThemeAssets {
        &self.assets
    }

    /// Playback state.
    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Index of the next step to apply.
    pub fn cursor(&self) -> usize {
        self.playback.cursor()
    }

    /// Current speed.
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Algorithm of the current or most recent run.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Statistics as last published to observers.
    pub fn observed_stats(&self) -> PlaybackStats {
        self.observed
    }

    /// Change the speed; takes effect on the next tick.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Which controls a UI should enable right now.
    pub fn controls(&self) -> Controls {
        let busy = !self.playback.accepts_start();
        Controls {
            generate_enabled: !busy,
            run_enabled: !busy && self.maze.is_some(),
            cancel_enabled: self.playback.state() == PlaybackState::Running,
        }
    }

    /// Request a new maze from the service and show it.
    ///
    /// Service failures leave the previous maze and playback state untouched.
    #[tracing::instrument(level = "debug", skip_all, fields(width = config.width, height = config.height))]
    pub fn generate(&mut self, config: &MazeConfig) -> MazeResult<StartOutcome> {
        if !self.playback.accepts_start() {
            return Ok(StartOutcome::Rejected(RejectReason::PlaybackActive));
        }
        config.validate()?;
        let maze = self.service.generate(config).inspect_err(|e| {
            tracing::warn!("maze generation failed: {e}");
        })?;
        self.install_maze(maze)
    }

    /// Show a maze obtained elsewhere.
    pub fn load_maze(&mut self, maze: Maze) -> MazeResult<StartOutcome> {
        if !self.playback.accepts_start() {
            return Ok(StartOutcome::Rejected(RejectReason::PlaybackActive));
        }
        self.install_maze(maze)
    }

    fn install_maze(&mut self, maze: Maze) -> MazeResult<StartOutcome> {
        maze.validate()?;
        tracing::info!(width = maze.width, height = maze.height, "maze loaded");
        self.maze = Some(maze);
        self.playback.disarm();
        self.observed = PlaybackStats::default();
        self.full_redraw()?;
        Ok(StartOutcome::Accepted)
    }

    /// Reset the previous run, fetch steps for `algorithm` and arm playback.
    ///
    /// Returns `Rejected` while a run is active or when no maze is loaded. A failed solve (or a
    /// step sequence that cannot be played) restores `Idle` and is returned as an error.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start(&mut self, algorithm: Algorithm) -> MazeResult<StartOutcome> {
        if !self.playback.accepts_start() {
            tracing::debug!("start rejected: playback active");
            return Ok(StartOutcome::Rejected(RejectReason::PlaybackActive));
        }
        let Self {
            service,
            target,
            renderer,
            assets,
            maze,
            playback,
            algorithm: current,
            observed,
            ..
        } = self;
        let Some(maze) = maze.as_mut() else {
            tracing::debug!("start rejected: no maze");
            return Ok(StartOutcome::Rejected(RejectReason::NoMaze));
        };

        let reset = maze.reset_transient();
        tracing::debug!(reset, "cleared previous run");
        let maze: &Maze = maze;
        paint_full(target, renderer, assets, Some(maze))?;

        *current = algorithm;
        *observed = PlaybackStats::default();
        playback.arm();

        let steps = match service
            .solve(maze, algorithm)
            .and_then(|steps| validate_steps(&steps, maze).map(|()| steps))
        {
            Ok(steps) => steps,
            Err(e) => {
                tracing::warn!("solve failed: {e}");
                playback.disarm();
                return Err(e);
            }
        };

        tracing::info!(steps = steps.len(), "playback started");
        playback.load(steps);
        Ok(StartOutcome::Accepted)
    }

    /// Run one scheduler tick, repainting only the cells the applied steps touched.
    pub fn tick(&mut self) -> MazeResult<TickReport> {
        let Self {
            target,
            renderer,
            assets,
            maze,
            playback,
            speed,
            observed,
            ..
        } = self;
        let Some(maze) = maze.as_mut() else {
            return Ok(TickReport {
                outcome: TickOutcome::Done(playback.state()),
                applied: 0,
                published: None,
            });
        };
        let projection = Projection::for_canvas(target.size(), maze.width, maze.height)?;

        let report = playback.advance(*speed, maze, |updates, maze| {
            for u in updates {
                let (slot, ops) = renderer.plan_cell(maze, &projection, u.pos, u.code, assets);
                target.paint(slot, &ops, assets)?;
            }
            Ok(())
        })?;

        if let Some(stats) = report.published {
            *observed = stats;
        }
        match report.outcome {
            TickOutcome::Done(PlaybackState::Finished) if report.applied > 0 => {
                tracing::info!(
                    nodes_expanded = observed.nodes_expanded,
                    success = ?observed.success,
                    path_length = ?observed.path_length,
                    "playback finished"
                );
            }
            TickOutcome::Done(PlaybackState::Cancelled) => {
                tracing::info!(cursor = playback.cursor(), "playback cancelled");
            }
            _ => {}
        }
        Ok(report)
    }

    /// Stop the active run at the next tick. Returns `false` when nothing was running.
    pub fn cancel(&mut self) -> bool {
        self.playback.cancel()
    }

    /// Follow a surface size change: resize the target and redraw everything.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resize(&mut self, canvas: Canvas) -> MazeResult<()> {
        self.target.resize(canvas)?;
        self.full_redraw()
    }

    /// Make a decoded theme texture available and redraw if a maze is showing.
    pub fn install_asset(&mut self, slot: AssetSlot, image: PreparedImage) -> MazeResult<()> {
        self.assets.install(slot, image)?;
        if self.maze.is_some() {
            self.full_redraw()?;
        }
        Ok(())
    }

    /// Decode and install an encoded theme texture.
    pub fn install_asset_bytes(&mut self, slot: AssetSlot, bytes: &[u8]) -> MazeResult<()> {
        let image = crate::assets::decode::decode_image(bytes)?;
        self.install_asset(slot, image)
    }

    /// Repaint the whole surface from the current maze state.
    pub fn full_redraw(&mut self) -> MazeResult<()> {
        paint_full(
            &mut self.target,
            &self.renderer,
            &self.assets,
            self.maze.as_ref(),
        )
    }

    /// Solve the current maze with every algorithm without animating (Run All).
    ///
    /// The maze is sent with the previous run's marks cleared; the displayed maze is not touched.
    /// A failing algorithm is reported in its own row and does not stop the others.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn compare_all(&mut self) -> CompareOutcome {
        if !self.playback.accepts_start() {
            return CompareOutcome::Rejected(RejectReason::PlaybackActive);
        }
        let Some(maze) = self.maze.as_ref() else {
            return CompareOutcome::Rejected(RejectReason::NoMaze);
        };
        let mut clean = maze.clone();
        clean.reset_transient();

        let rows = Algorithm::ALL
            .into_iter()
            .map(|algorithm| match self.service.solve(&clean, algorithm) {
                Ok(steps) => match steps.last() {
                    Some(last) => AlgorithmSummary {
                        algorithm,
                        success: last.success,
                        path_length: last.success.then_some(last.path_length),
                        nodes_expanded: last.nodes_expanded,
                        steps: steps.len(),
                        error: None,
                    },
                    None => AlgorithmSummary::failed(
                        algorithm,
                        &MazeError::validation("solver returned no steps"),
                    ),
                },
                Err(e) => {
                    tracing::warn!(%algorithm, "compare solve failed: {e}");
                    AlgorithmSummary::failed(algorithm, &e)
                }
            })
            .collect();
        CompareOutcome::Completed(rows)
    }
}

fn paint_full<T: RenderTarget>(
    target: &mut T,
    renderer: &Renderer,
    assets: &ThemeAssets,
    maze: Option<&Maze>,
) -> MazeResult<()> {
    let canvas = target.size();
    let region = canvas.bounds();
    let Some(maze) = maze else {
        let ops = [PaintOp::Fill {
            rect: region,
            color: renderer.clear_color(),
        }];
        return target.paint(region, &ops, assets);
    };
    let projection = Projection::for_canvas(canvas, maze.width, maze.height)?;
    let ops = renderer.plan_full(maze, &projection, region, assets);
    target.paint(region, &ops, assets)
}

#[cfg(test)]
#[path = "../../tests/unit/session/engine.rs"]
mod tests;
