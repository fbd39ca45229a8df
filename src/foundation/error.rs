/// Convenience result type used across mazetrace.
pub type MazeResult<T> = Result<T, MazeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Disallowed-but-harmless control races (starting twice, running without a maze) are not errors;
/// they are reported as [`crate::StartOutcome::Rejected`]. Unloaded theme assets are not errors
/// either; the renderer falls back to flat fills.
#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    /// Invalid user-provided data (canvas size, speed, config ranges, step sequences).
    #[error("validation error: {0}")]
    Validation(String),

    /// A maze accepted from the generator violates its structural invariants.
    #[error("invalid maze: {0}")]
    InvalidMaze(String),

    /// The external maze service failed (transport, status or payload).
    #[error("request failed: {0}")]
    Request(String),

    /// Errors while rasterizing into a render target.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MazeError {
    /// Build a [`MazeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MazeError::InvalidMaze`] value.
    pub fn invalid_maze(msg: impl Into<String>) -> Self {
        Self::InvalidMaze(msg.into())
    }

    /// Build a [`MazeError::Request`] value.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Build a [`MazeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MazeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
