use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{MazeError, MazeResult};
use crate::model::algorithm::Algorithm;
use crate::model::config::MazeConfig;
use crate::model::maze::Maze;
use crate::model::step::Step;
use crate::service::MazeService;

/// File name of the maze inside a fixture directory.
pub const FIXTURE_MAZE_FILE: &str = "maze.json";

/// Scripted maze service backed by in-memory fixtures.
///
/// `generate` returns the configured maze regardless of the config; `solve` returns the steps
/// registered for the algorithm. Call counters let tests check how often the engine reached out.
#[derive(Clone, Debug, Default)]
pub struct FixtureMazeService {
    maze: Option<Maze>,
    steps: HashMap<Algorithm, Vec<Step>>,
    generate_calls: usize,
    solve_calls: usize,
}

impl FixtureMazeService {
    /// Empty fixture set: every call fails with a request error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `maze` from `generate`.
    pub fn with_maze(mut self, maze: Maze) -> Self {
        self.maze = Some(maze);
        self
    }

    /// Serve `steps` from `solve` for `algorithm`.
    pub fn with_steps(mut self, algorithm: Algorithm, steps: Vec<Step>) -> Self {
        self.steps.insert(algorithm, steps);
        self
    }

    /// Load `maze.json` plus any `<slug>.json` step files (`bfs.json`, `astar.json`, ...) from
    /// `dir`. Algorithms without a file stay unregistered.
    pub fn from_dir(dir: impl AsRef<Path>) -> MazeResult<Self> {
        let dir = dir.as_ref();
        let maze: Maze = read_json(&dir.join(FIXTURE_MAZE_FILE))?;
        let mut out = Self::new().with_maze(maze);
        for algorithm in Algorithm::ALL {
            let path = dir.join(format!("{}.json", algorithm.slug()));
            if !path.exists() {
                continue;
            }
            let steps: Vec<Step> = read_json(&path)?;
            out.steps.insert(algorithm, steps);
        }
        tracing::debug!(dir = %dir.display(), algorithms = out.steps.len(), "loaded maze fixtures");
        Ok(out)
    }

    /// Number of `generate` calls served so far.
    pub fn generate_calls(&self) -> usize {
        self.generate_calls
    }

    /// Number of `solve` calls served so far.
    pub fn solve_calls(&self) -> usize {
        self.solve_calls
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> MazeResult<T> {
    let f = File::open(path).with_context(|| format!("open fixture '{}'", path.display()))?;
    let reader = BufReader::new(f);
    serde_json::from_reader(reader)
        .map_err(|e| MazeError::serde(format!("{}: {e}", path.display())))
}

impl MazeService for FixtureMazeService {
    fn generate(&mut self, _config: &MazeConfig) -> MazeResult<Maze> {
        self.generate_calls += 1;
        self.maze
            .clone()
            .ok_or_else(|| MazeError::request("fixture service has no maze"))
    }

    fn solve(&mut self, _maze: &Maze, algorithm: Algorithm) -> MazeResult<Vec<Step>> {
        self.solve_calls += 1;
        self.steps
            .get(&algorithm)
            .cloned()
            .ok_or_else(|| MazeError::request(format!("fixture service has no steps for {algorithm}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/fixture.rs"]
mod tests;
