//! Maze generator / solver collaborators.
//!
//! The engine issues exactly one `generate` per "Generate" and one `solve` per run; both complete
//! before any animation tick happens.

use crate::foundation::error::MazeResult;
use crate::model::algorithm::Algorithm;
use crate::model::config::MazeConfig;
use crate::model::maze::Maze;
use crate::model::step::Step;

/// In-memory and on-disk fixture service.
pub mod fixture;
/// HTTP client for the maze service API.
#[cfg(feature = "http")]
pub mod http;

/// Source of mazes and solver step sequences.
pub trait MazeService {
    /// Produce a maze for `config`.
    fn generate(&mut self, config: &MazeConfig) -> MazeResult<Maze>;

    /// Run `algorithm` on `maze` to completion and return every step it emitted.
    fn solve(&mut self, maze: &Maze, algorithm: Algorithm) -> MazeResult<Vec<Step>>;
}

impl<S: MazeService + ?Sized> MazeService for Box<S> {
    fn generate(&mut self, config: &MazeConfig) -> MazeResult<Maze> {
        (**self).generate(config)
    }

    fn solve(&mut self, maze: &Maze, algorithm: Algorithm) -> MazeResult<Vec<Step>> {
        (**self).solve(maze, algorithm)
    }
}
