use std::path::PathBuf;

use gridsys_core::{GridError, PreconditionError, ValidationError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid grid system: {0}")]
    Validation(#[from] ValidationError),

    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("edit rejected: {0}")]
    Grid(#[from] GridError),

    #[error("invalid config: {}", .problems.join("; "))]
    Config { problems: Vec<String> },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("required path does not exist: {path}")]
    MissingPath { path: PathBuf },
}

impl CliError {
    /// Process exit code: 2 for usage problems, 3 for rejected grid data,
    /// 1 for everything else.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } | Self::MissingPath { .. } | Self::Config { .. } => 2,
            Self::Validation(_) | Self::Precondition(_) | Self::Grid(_) => 3,
            Self::Io(_) | Self::Json(_) | Self::Toml(_) => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
