//! Crate-wide error type.
//!
//! Every component error converts into [`MeridianError`], which `main` reports once.

use thiserror::Error;

use crate::{
    exec::{ExecError, TemplateError},
    geo::FetchError,
    location::InvalidField,
};

#[derive(Error, Debug)]
pub enum MeridianError {
    #[error(transparent)]
    InvalidField(#[from] InvalidField),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MeridianError>;
