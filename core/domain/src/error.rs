use thiserror::Error;

/// Business-level failure surfaced to API consumers
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DomainError {
    /// User with the given id does not exist
    #[error("user {id} not found")]
    UserNotFound {
        /// Requested user id
        id: String,
    },
    /// Book with the given id does not exist
    #[error("book {id} not found")]
    BookNotFound {
        /// Requested book id
        id: String,
    },
    /// Operation collides with existing state
    #[error("conflict: {message}")]
    Conflict {
        /// Description provided by the remote side
        message: String,
        /// Entity involved, if known
        id: Option<String>,
    },
    /// Input has been rejected by the remote side
    #[error("validation failed: {message}")]
    ValidationFailed {
        /// Description provided by the remote side
        message: String,
    },
    /// Remote side failed in an unexpected way
    #[error("remote operation failed: {message}")]
    RemoteOperationFailed {
        /// Description provided by the remote side
        message: String,
    },
}
