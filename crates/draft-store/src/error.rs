//! Draft storage errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}
