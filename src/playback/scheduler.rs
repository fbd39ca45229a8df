use std::time::Duration;

use crate::foundation::error::MazeResult;
use crate::model::maze::Maze;
use crate::model::step::{GridUpdate, Step};
use crate::playback::speed::Speed;

/// Lifecycle of one animation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize)]
pub enum PlaybackState {
    /// No run has been started, or the last one failed before animating.
    #[default]
    Idle,
    /// Steps are being applied.
    Running,
    /// Every step was applied.
    Finished,
    /// Stopped by the user before the end.
    Cancelled,
}

impl PlaybackState {
    /// Return `true` for `Finished` and `Cancelled`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

/// Search statistics as last published to observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize)]
pub struct PlaybackStats {
    /// Nodes expanded so far.
    pub nodes_expanded: u64,
    /// Whether the search reached the end; known once the final step is applied.
    pub success: Option<bool>,
    /// Length of the found path; only present on success.
    pub path_length: Option<u64>,
}

/// What the host should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick again on the next animation frame.
    NextFrame,
    /// Wait this long, then tick on the following frame.
    After(Duration),
    /// The chain is over; do not tick again.
    Done(PlaybackState),
}

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Continuation decision.
    pub outcome: TickOutcome,
    /// Steps applied during this tick.
    pub applied: usize,
    /// Statistics published during this tick, if the throttle allowed it.
    pub published: Option<PlaybackStats>,
}

impl TickReport {
    fn done(state: PlaybackState) -> Self {
        Self {
            outcome: TickOutcome::Done(state),
            applied: 0,
            published: None,
        }
    }
}

/// Steps between two statistics publications.
pub const STATS_EVERY: usize = 10;

/// Cooperative step scheduler.
///
/// The scheduler never sleeps: each [`Playback::advance`] call applies one batch and returns how
/// long the host should wait. A run holds a continuation chain from [`Playback::arm`] until a
/// tick observes the end or a cancellation; no new run is accepted while a chain is live.
#[derive(Debug, Default)]
pub struct Playback {
    steps: Vec<Step>,
    cursor: usize,
    state: PlaybackState,
    chain_live: bool,
    stats: PlaybackStats,
}

impl Playback {
    /// Idle scheduler with no steps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the next step to apply.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of loaded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Return `true` when no steps are loaded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Statistics accumulated from every applied step, published or not.
    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }

    /// Return `true` while a tick chain still has to observe the end of the run.
    pub fn chain_live(&self) -> bool {
        self.chain_live
    }

    /// Return `true` when a new run may start.
    pub fn accepts_start(&self) -> bool {
        !self.chain_live
    }

    /// Begin a run: enter `Running` and take the run lock. Steps follow via [`Playback::load`].
    pub fn arm(&mut self) {
        self.steps.clear();
        self.cursor = 0;
        self.stats = PlaybackStats::default();
        self.state = PlaybackState::Running;
        self.chain_live = true;
    }

    /// Hand the fetched steps to an armed run.
    pub fn load(&mut self, steps: Vec<Step>) {
        self.steps = steps;
        self.cursor = 0;
    }

    /// Abort an armed run that never started animating and release the run lock.
    pub fn disarm(&mut self) {
        self.steps.clear();
        self.cursor = 0;
        self.state = PlaybackState::Idle;
        self.chain_live = false;
    }

    /// Request cancellation. The next tick observes it and applies nothing.
    ///
    /// Returns `true` if this call moved the run from `Running` to `Cancelled`.
    pub fn cancel(&mut self) -> bool {
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Cancelled;
            return true;
        }
        false
    }

    /// Apply the next batch of steps to `maze`, calling `redraw` with each step's deltas.
    ///
    /// The batch size and the follow-up delay are read from `speed` on every call. A failed
    /// apply or redraw ends the run in `Idle` and releases the run lock.
    pub fn advance<F>(
        &mut self,
        speed: Speed,
        maze: &mut Maze,
        mut redraw: F,
    ) -> MazeResult<TickReport>
    where
        F: FnMut(&[GridUpdate], &Maze) -> MazeResult<()>,
    {
        if !self.chain_live {
            return Ok(TickReport::done(self.state));
        }
        if self.state != PlaybackState::Running {
            self.chain_live = false;
            tracing::debug!(state = ?self.state, cursor = self.cursor, "playback chain observed stop");
            return Ok(TickReport::done(self.state));
        }

        let last = self.steps.len().saturating_sub(1);
        let mut applied = 0usize;
        let mut published = None;
        while applied < speed.batch() && self.cursor < self.steps.len() {
            let i = self.cursor;
            let step = &self.steps[i];
            let res = maze
                .apply(&step.grid_updates)
                .and_then(|()| redraw(&step.grid_updates, maze));
            if let Err(e) = res {
                self.state = PlaybackState::Idle;
                self.chain_live = false;
                return Err(e);
            }

            self.stats.nodes_expanded = step.nodes_expanded;
            if step.finished {
                self.stats.success = Some(step.success);
                self.stats.path_length = step.success.then_some(step.path_length);
            }
            if i % STATS_EVERY == 0 || i == last {
                published = Some(self.stats);
            }

            self.cursor += 1;
            applied += 1;
        }

        let outcome = if self.cursor >= self.steps.len() {
            self.state = PlaybackState::Finished;
            self.chain_live = false;
            TickOutcome::Done(PlaybackState::Finished)
        } else {
            match speed.delay() {
                Some(d) => TickOutcome::After(d),
                None => TickOutcome::NextFrame,
            }
        };

        tracing::debug!(
            applied,
            cursor = self.cursor,
            total = self.steps.len(),
            speed = speed.get(),
            "playback tick"
        );
        Ok(TickReport {
            outcome,
            applied,
            published,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
