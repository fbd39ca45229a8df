use crate::foundation::core::GridPos;
use crate::foundation::error::{MazeError, MazeResult};
use crate::model::maze::{CellCode, Maze};

/// One cell delta. Wire form is a `[row, col, code]` triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "(usize, usize, CellCode)", into = "(usize, usize, CellCode)")]
pub struct GridUpdate {
    /// Target cell.
    pub pos: GridPos,
    /// New code for the cell.
    pub code: CellCode,
}

impl GridUpdate {
    /// Build an update for `(row, col)`.
    pub const fn new(row: usize, col: usize, code: CellCode) -> Self {
        Self {
            pos: GridPos::new(row, col),
            code,
        }
    }
}

impl From<(usize, usize, CellCode)> for GridUpdate {
    fn from((row, col, code): (usize, usize, CellCode)) -> Self {
        Self::new(row, col, code)
    }
}

impl From<GridUpdate> for (usize, usize, CellCode) {
    fn from(u: GridUpdate) -> Self {
        (u.pos.row, u.pos.col, u.code)
    }
}

/// One unit of algorithm progress emitted by the solver.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    /// Cell deltas caused by this step, applied in order.
    #[serde(default)]
    pub grid_updates: Vec<GridUpdate>,
    /// Running count of expanded nodes.
    #[serde(default)]
    pub nodes_expanded: u64,
    /// Set on the last step of a run.
    #[serde(default)]
    pub finished: bool,
    /// Whether a path was found. Only meaningful once `finished`.
    #[serde(default)]
    pub success: bool,
    /// Length of the found path. Only meaningful if `success`.
    #[serde(default)]
    pub path_length: u64,
}

impl Step {
    /// An intermediate step.
    pub fn progress(grid_updates: Vec<GridUpdate>, nodes_expanded: u64) -> Self {
        Self {
            grid_updates,
            nodes_expanded,
            ..Self::default()
        }
    }

    /// A terminal step.
    pub fn finish(
        grid_updates: Vec<GridUpdate>,
        nodes_expanded: u64,
        success: bool,
        path_length: u64,
    ) -> Self {
        Self {
            grid_updates,
            nodes_expanded,
            finished: true,
            success,
            path_length,
        }
    }
}

/// Check that a step sequence can be played back against `maze`.
///
/// The sequence must be non-empty, end with a `finished` step, and only touch in-bounds cells.
pub fn validate_steps(steps: &[Step], maze: &Maze) -> MazeResult<()> {
    let Some(last) = steps.last() else {
        return Err(MazeError::validation("step sequence must not be empty"));
    };
    if !last.finished {
        return Err(MazeError::validation(
            "last step of a sequence must have finished = true",
        ));
    }
    for (i, step) in steps.iter().enumerate() {
        if let Some(u) = step.grid_updates.iter().find(|u| !maze.contains(u.pos)) {
            return Err(MazeError::validation(format!(
                "step {i} updates out-of-bounds cell ({}, {})",
                u.pos.row, u.pos.col
            )));
        }
    }
    Ok(())
}

/// Parse a JSON step array.
pub fn steps_from_json(s: &str) -> MazeResult<Vec<Step>> {
    serde_json::from_str(s).map_err(|e| MazeError::serde(e.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/model/step.rs"]
mod tests;
