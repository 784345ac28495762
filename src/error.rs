//! Errors.

use thiserror::Error;

/// Errors from configuring a [`ProgressRange`](crate::ProgressRange).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProgressError {
    #[error("min cannot be higher than max ({min} > {max})")]
    MinAboveMax { min: f64, max: f64 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
