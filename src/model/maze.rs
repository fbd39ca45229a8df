use crate::foundation::core::GridPos;
use crate::foundation::error::{MazeError, MazeResult};
use crate::model::step::GridUpdate;

/// Visual/logical state of one grid cell.
///
/// The wire form is the integer tag shared with the maze service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CellCode {
    /// Impassable wall (`1`).
    Wall,
    /// Passable, unvisited cell (`2`).
    Empty,
    /// Frontier cell currently being explored (`3`).
    Frontier,
    /// Explored and abandoned (`4`).
    DeadEnd,
    /// Part of the reconstructed path (`5`).
    Path,
    /// Start marker (`10`).
    Start,
    /// End marker (`11`).
    End,
}

impl CellCode {
    /// All codes, in table order.
    pub const ALL: [Self; 7] = [
        Self::Wall,
        Self::Empty,
        Self::Frontier,
        Self::DeadEnd,
        Self::Path,
        Self::Start,
        Self::End,
    ];

    /// Integer wire tag.
    pub const fn code(self) -> u8 {
        match self {
            Self::Wall => 1,
            Self::Empty => 2,
            Self::Frontier => 3,
            Self::DeadEnd => 4,
            Self::Path => 5,
            Self::Start => 10,
            Self::End => 11,
        }
    }

    /// Dense index into per-code lookup tables.
    pub const fn index(self) -> usize {
        match self {
            Self::Wall => 0,
            Self::Empty => 1,
            Self::Frontier => 2,
            Self::DeadEnd => 3,
            Self::Path => 4,
            Self::Start => 5,
            Self::End => 6,
        }
    }

    /// Codes written by a search run and cleared before the next one.
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Frontier | Self::DeadEnd | Self::Path)
    }
}

impl TryFrom<u8> for CellCode {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Ok(match v {
            1 => Self::Wall,
            2 => Self::Empty,
            3 => Self::Frontier,
            4 => Self::DeadEnd,
            5 => Self::Path,
            10 => Self::Start,
            11 => Self::End,
            other => return Err(format!("unknown cell code {other}")),
        })
    }
}

impl From<CellCode> for u8 {
    fn from(c: CellCode) -> Self {
        c.code()
    }
}

/// Grid maze as produced by the maze service.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Maze {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Row-major `height × width` matrix.
    pub grid: Vec<Vec<CellCode>>,
    /// Start marker position.
    pub start_pos: GridPos,
    /// End marker position.
    pub end_pos: GridPos,
}

impl Maze {
    /// Build an all-empty maze with the given markers stamped in.
    pub fn open(width: usize, height: usize, start: GridPos, end: GridPos) -> MazeResult<Self> {
        let mut maze = Self {
            width,
            height,
            grid: vec![vec![CellCode::Empty; width]; height],
            start_pos: start,
            end_pos: end,
        };
        if maze.contains(start) && maze.contains(end) {
            maze.stamp_markers();
        }
        maze.validate()?;
        Ok(maze)
    }

    /// Parse and validate a maze from JSON.
    pub fn from_json(s: &str) -> MazeResult<Self> {
        let maze: Self = serde_json::from_str(s).map_err(|e| MazeError::serde(e.to_string()))?;
        maze.validate()?;
        Ok(maze)
    }

    /// Check the structural invariants required before a maze is rendered or reset.
    ///
    /// Start and end must be in bounds, distinct, and must not sit on walls: the reset between
    /// runs only ever restores transient codes to empty and re-stamps the markers.
    pub fn validate(&self) -> MazeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::invalid_maze("width and height must be > 0"));
        }
        if self.grid.len() != self.height {
            return Err(MazeError::invalid_maze(format!(
                "grid has {} rows, expected {}",
                self.grid.len(),
                self.height
            )));
        }
        if let Some((r, row)) = self
            .grid
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.width)
        {
            return Err(MazeError::invalid_maze(format!(
                "grid row {r} has {} columns, expected {}",
                row.len(),
                self.width
            )));
        }
        for (name, p) in [("start_pos", self.start_pos), ("end_pos", self.end_pos)] {
            if !self.contains(p) {
                return Err(MazeError::invalid_maze(format!(
                    "{name} ({}, {}) is out of bounds",
                    p.row, p.col
                )));
            }
            if self.grid[p.row][p.col] == CellCode::Wall {
                return Err(MazeError::invalid_maze(format!(
                    "{name} ({}, {}) is on a wall",
                    p.row, p.col
                )));
            }
        }
        if self.start_pos == self.end_pos {
            return Err(MazeError::invalid_maze("start_pos and end_pos must differ"));
        }
        Ok(())
    }

    /// Return `true` when `p` lies inside the grid.
    pub fn contains(&self, p: GridPos) -> bool {
        p.row < self.height && p.col < self.width
    }

    /// Cell code at `p`, if in bounds.
    pub fn get(&self, p: GridPos) -> Option<CellCode> {
        self.grid.get(p.row).and_then(|row| row.get(p.col)).copied()
    }

    /// Overwrite one cell. Out-of-bounds writes are rejected.
    pub fn set(&mut self, p: GridPos, code: CellCode) -> MazeResult<()> {
        let cell = self
            .grid
            .get_mut(p.row)
            .and_then(|row| row.get_mut(p.col))
            .ok_or_else(|| {
                MazeError::validation(format!("cell ({}, {}) is out of bounds", p.row, p.col))
            })?;
        *cell = code;
        Ok(())
    }

    /// Apply a batch of step deltas in order.
    pub fn apply(&mut self, updates: &[GridUpdate]) -> MazeResult<()> {
        for u in updates {
            self.set(u.pos, u.code)?;
        }
        Ok(())
    }

    /// Return `true` when `p` is the start or end marker position.
    pub fn is_marker(&self, p: GridPos) -> bool {
        p == self.start_pos || p == self.end_pos
    }

    /// Clear the previous run: transient codes go back to empty, then markers are re-stamped.
    ///
    /// Returns the number of cells that changed.
    pub fn reset_transient(&mut self) -> usize {
        let mut changed = 0usize;
        for cell in self.grid.iter_mut().flatten() {
            if cell.is_transient() {
                *cell = CellCode::Empty;
                changed += 1;
            }
        }
        changed + self.stamp_markers()
    }

    fn stamp_markers(&mut self) -> usize {
        let mut changed = 0usize;
        for (p, code) in [
            (self.start_pos, CellCode::Start),
            (self.end_pos, CellCode::End),
        ] {
            if let Some(cell) = self.grid.get_mut(p.row).and_then(|row| row.get_mut(p.col))
                && *cell != code
            {
                *cell = code;
                changed += 1;
            }
        }
        changed
    }

    /// Iterate `(position, code)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (GridPos, CellCode)> + '_ {
        self.grid.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &code)| (GridPos::new(r, c), code))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/maze.rs"]
mod tests;
