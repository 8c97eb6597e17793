use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid input file '{}': {reason}", .path.display())]
    InvalidInput { path: PathBuf, reason: String },

    #[error("Failed to parse structure file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Failed to write structure file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
