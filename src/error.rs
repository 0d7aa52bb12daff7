//! Error Types
//!
//! One enum per layer: board store, remote service, sync coordinator.

use thiserror::Error;

use crate::models::ListId;

/// Board store failures. None of them change state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("unknown list {0}")]
    UnknownList(ListId),
    #[error("{0} not found")]
    NotFound(String),
    #[error("duplicate id {0}")]
    DuplicateId(String),
}

/// Any failure talking to the board service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("request to {endpoint} failed: {message}")]
    Http { endpoint: String, message: String },
    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("unreadable response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("board service error: {0}")]
    Remote(#[from] RemoteError),
    #[error("attachment upload failed: {0}")]
    AttachmentUpload(RemoteError),
}

impl SyncError {
    /// Not-found style errors are logged, never shown to the user
    pub fn is_quiet(&self) -> bool {
        matches!(self, SyncError::Board(BoardError::NotFound(_) | BoardError::UnknownList(_)))
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
