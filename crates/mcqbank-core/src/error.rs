//! Error types for the question bank.
//!
//! Every failure is recoverable: the caller reports it and keeps its previous
//! snapshot of the store, which is never modified by a failed operation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, mutating, or quizzing over a store.
#[derive(Debug, Error)]
pub enum BankError {
    /// The backing file exists but could not be read or parsed.
    #[error("failed to read question store {}: {message}", path.display())]
    StorageRead { path: PathBuf, message: String },

    /// The backing file could not be written. The previous file is intact.
    #[error("failed to write question store {}: {message}", path.display())]
    StorageWrite { path: PathBuf, message: String },

    /// User input was rejected before anything was changed.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A position did not address a record in the current store.
    #[error("no question at position {position} (store has {len} questions)")]
    NotFound { position: usize, len: usize },
}

impl BankError {
    /// Returns `true` for I/O and parse failures of the backing file.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            BankError::StorageRead { .. } | BankError::StorageWrite { .. }
        )
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        BankError::Validation(message.into())
    }
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, BankError>;
