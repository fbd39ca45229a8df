use std::time::{Duration, Instant};

use crate::foundation::error::MazeResult;
use crate::playback::scheduler::{PlaybackState, TickOutcome, TickReport};
use crate::render::backend::RenderTarget;
use crate::service::MazeService;
use crate::session::engine::Engine;

/// Display frame interval assumed by [`drive`] for `NextFrame`.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Time source for the host loop.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
    /// Block (or pretend to) for `d`.
    fn sleep(&mut self, d: Duration);
}

/// Wall clock backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Virtual clock for tests: `sleep` advances time instantly.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    /// Clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward without a tick.
    pub fn advance(&mut self, d: Duration) {
        self.now += d;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, d: Duration) {
        self.now += d;
    }
}

/// One tick as seen by the host loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickEvent {
    /// Clock time at which the tick ran.
    pub at: Duration,
    /// What the tick did.
    pub report: TickReport,
}

/// Run the tick chain of the armed run until it ends.
///
/// `NextFrame` waits one `frame_interval`; `After(d)` waits `d` and then one more frame, the way a
/// browser timer followed by an animation-frame callback would. `on_tick` runs after every tick
/// and may cancel the run through the engine. Returns the state the chain ended in.
pub fn drive<S, T, C, F>(
    engine: &mut Engine<S, T>,
    clock: &mut C,
    frame_interval: Duration,
    mut on_tick: F,
) -> MazeResult<PlaybackState>
where
    S: MazeService,
    T: RenderTarget,
    C: Clock,
    F: FnMut(&mut Engine<S, T>, &TickEvent),
{
    let mut ticks = 0u64;
    loop {
        let at = clock.now();
        let report = engine.tick()?;
        ticks += 1;
        on_tick(engine, &TickEvent { at, report });
        match report.outcome {
            TickOutcome::NextFrame => clock.sleep(frame_interval),
            TickOutcome::After(d) => clock.sleep(d + frame_interval),
            TickOutcome::Done(state) => {
                tracing::debug!(ticks, ?state, elapsed = ?clock.now(), "tick chain ended");
                return Ok(state);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/host.rs"]
mod tests;
