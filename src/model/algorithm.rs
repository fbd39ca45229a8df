use std::fmt;
use std::str::FromStr;

use crate::foundation::error::MazeError;

/// Search algorithms the maze service can run.
///
/// Serialized using the service's display names (`"BFS"`, `"A*"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Algorithm {
    /// Breadth-first search.
    #[serde(rename = "BFS")]
    Bfs,
    /// Depth-first search.
    #[serde(rename = "DFS")]
    Dfs,
    /// Iterative deepening depth-first search.
    #[serde(rename = "Iterative Deepening DFS")]
    Iddfs,
    /// Bidirectional breadth-first search.
    #[serde(rename = "Bidirectional BFS")]
    BidirectionalBfs,
    /// Greedy best-first search.
    #[serde(rename = "Greedy Best-First Search")]
    GreedyBestFirst,
    /// A* search.
    #[serde(rename = "A*")]
    AStar,
}

impl Algorithm {
    /// Every algorithm, in the order the comparison table lists them.
    pub const ALL: [Self; 6] = [
        Self::Bfs,
        Self::Dfs,
        Self::Iddfs,
        Self::BidirectionalBfs,
        Self::GreedyBestFirst,
        Self::AStar,
    ];

    /// Name used on the wire.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Iddfs => "Iterative Deepening DFS",
            Self::BidirectionalBfs => "Bidirectional BFS",
            Self::GreedyBestFirst => "Greedy Best-First Search",
            Self::AStar => "A*",
        }
    }

    /// Short lowercase identifier, used for fixture file names and CLI arguments.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Iddfs => "iddfs",
            Self::BidirectionalBfs => "bibfs",
            Self::GreedyBestFirst => "greedy",
            Self::AStar => "astar",
        }
    }

    /// Human-readable title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Bfs => "Breadth-First Search (BFS)",
            Self::Dfs => "Depth-First Search (DFS)",
            Self::Iddfs => "Iterative Deepening DFS (IDDFS)",
            Self::BidirectionalBfs => "Bidirectional BFS",
            Self::GreedyBestFirst => "Greedy Best-First Search",
            Self::AStar => "A* Search",
        }
    }

    /// One-sentence description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Bfs => {
                "Explores all neighbor nodes at the present depth before moving on to the next depth level."
            }
            Self::Dfs => "Explores as far as possible along each branch before backtracking.",
            Self::Iddfs => {
                "Combines depth-first search's space-efficiency and breadth-first search's completeness."
            }
            Self::BidirectionalBfs => {
                "Runs two simultaneous breadth-first searches: one from the start node and one from the goal node."
            }
            Self::GreedyBestFirst => {
                "Expands the node that is estimated to be closest to the goal."
            }
            Self::AStar => {
                "Best-first search ordered by path cost so far plus an admissible heuristic estimate to the goal."
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Algorithm {
    type Err = MazeError;

    /// Accepts wire names and short aliases (`bfs`, `dfs`, `iddfs`, `bibfs`, `greedy`, `astar`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(a) = Self::ALL.into_iter().find(|a| a.wire_name() == s) {
            return Ok(a);
        }
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "iddfs" => Ok(Self::Iddfs),
            "bibfs" | "bidirectional" => Ok(Self::BidirectionalBfs),
            "greedy" | "gbfs" => Ok(Self::GreedyBestFirst),
            "astar" | "a*" => Ok(Self::AStar),
            _ => Err(MazeError::validation(format!("unknown algorithm '{s}'"))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/algorithm.rs"]
mod tests;
