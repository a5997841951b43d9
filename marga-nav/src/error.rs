//! Error types for MargaNav.

use thiserror::Error;

use marga_core::{PlanningError, WorldError};

/// MargaNav error type.
#[derive(Error, Debug)]
pub enum NavError {
    #[error("world error: {0}")]
    World(#[from] WorldError),

    #[error("planning error: {0}")]
    Planning(#[from] PlanningError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
