use thiserror::Error;

use super::graphql::ClientError;

/// Why a `delete` or `item-list` invocation stopped.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// Malformed arguments; nothing was executed.
    #[error("{0}")]
    InvalidInput(String),

    /// Owner or project omitted where no prompt is available.
    #[error("{0}")]
    AmbiguousReference(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AccessDenied(String),

    #[error(transparent)]
    Transport(#[from] ClientError),

    /// The query worked but there was nothing to show.
    #[error("{0}")]
    NoResults(String),

    #[error("prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}

pub type ProjectResult<T> = Result<T, ProjectError>;
