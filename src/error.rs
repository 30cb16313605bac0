//! Error types for rendering and input decoding.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by the fallible entry points.
///
/// The plain `render`/`summarize` calls never fail; these come from
/// `try_render` and from decoding JSON input.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The schedule failed validation. Carries the first problem found.
    #[error("invalid schedule: {0}")]
    Invalid(#[from] ValidationError),

    /// The simulator JSON could not be decoded.
    #[error("failed to parse schedule: {0}")]
    Parse(#[from] serde_json::Error),

    /// An export configuration could not be decoded.
    #[error("failed to parse export config: {0}")]
    Config(#[source] serde_json::Error),
}
