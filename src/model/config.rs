use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{MazeError, MazeResult};

/// Smallest grid edge the maze service accepts.
pub const MIN_GRID_EDGE: usize = 5;
/// Largest grid edge the maze service accepts.
pub const MAX_GRID_EDGE: usize = 100;

/// Maze generation request sent to the maze service.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Columns, in `[5, 100]`.
    pub width: usize,
    /// Rows, in `[5, 100]`.
    pub height: usize,
    /// Fraction of cells that become walls, in `[0, 1]`.
    pub wall_density: f64,
    /// Keep the start marker at its fixed corner.
    pub start_fixed: bool,
    /// Keep the end marker at its fixed corner.
    pub end_fixed: bool,
    /// Require at least one start→end path.
    pub guaranteed_path: bool,
    /// Require that no start→end path exists.
    pub no_path: bool,
    /// Require exactly one start→end path.
    pub unique_path: bool,
    /// Allow loops in the passage graph.
    pub allow_cycles: bool,
    /// Density of dead-end branches, in `[0, 1]`.
    pub dead_end_density: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            wall_density: 0.3,
            start_fixed: true,
            end_fixed: true,
            guaranteed_path: true,
            no_path: false,
            unique_path: false,
            allow_cycles: false,
            dead_end_density: 0.5,
        }
    }
}

/// Path-constraint flags that exclude one another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintFlag {
    /// [`MazeConfig::guaranteed_path`].
    GuaranteedPath,
    /// [`MazeConfig::no_path`].
    NoPath,
    /// [`MazeConfig::unique_path`].
    UniquePath,
    /// [`MazeConfig::allow_cycles`].
    AllowCycles,
}

impl MazeConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> MazeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open maze config JSON '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| MazeError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check numeric ranges and constraint consistency.
    pub fn validate(&self) -> MazeResult<()> {
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if !(MIN_GRID_EDGE..=MAX_GRID_EDGE).contains(&v) {
                return Err(MazeError::validation(format!(
                    "{name} must be in [{MIN_GRID_EDGE}, {MAX_GRID_EDGE}], got {v}"
                )));
            }
        }
        for (name, v) in [
            ("wall_density", self.wall_density),
            ("dead_end_density", self.dead_end_density),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(MazeError::validation(format!(
                    "{name} must be in [0, 1], got {v}"
                )));
            }
        }
        if self.guaranteed_path && self.no_path {
            return Err(MazeError::validation(
                "guaranteed_path and no_path are mutually exclusive",
            ));
        }
        if self.unique_path && (!self.guaranteed_path || self.allow_cycles) {
            return Err(MazeError::validation(
                "unique_path requires guaranteed_path and excludes allow_cycles",
            ));
        }
        Ok(())
    }

    /// Set a constraint flag and clear whatever it excludes.
    ///
    /// Turning a flag off never touches the others. Turning it on applies:
    ///
    /// - `guaranteed_path` clears `no_path`
    /// - `no_path` clears `guaranteed_path` and `unique_path`
    /// - `unique_path` sets `guaranteed_path`, clears `no_path` and `allow_cycles`
    /// - `allow_cycles` clears `unique_path`
    pub fn reconcile(&mut self, flag: ConstraintFlag, on: bool) {
        match flag {
            ConstraintFlag::GuaranteedPath => {
                self.guaranteed_path = on;
                if on {
                    self.no_path = false;
                }
            }
            ConstraintFlag::NoPath => {
                self.no_path = on;
                if on {
                    self.guaranteed_path = false;
                    self.unique_path = false;
                }
            }
            ConstraintFlag::UniquePath => {
                self.unique_path = on;
                if on {
                    self.guaranteed_path = true;
                    self.no_path = false;
                    self.allow_cycles = false;
                }
            }
            ConstraintFlag::AllowCycles => {
                self.allow_cycles = on;
                if on {
                    self.unique_path = false;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/config.rs"]
mod tests;
