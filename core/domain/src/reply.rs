use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a business-level failure
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum FailureKind {
    /// Referenced entity does not exist
    NotFound,
    /// Operation collides with existing state (e.g. a taken login)
    Conflict,
    /// Input is syntactically fine but semantically invalid
    ValidationFailed,
    /// Remote side failed for reasons unrelated to the input
    Internal,
}

/// Type of entity a failure refers to
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum EntityKind {
    #[allow(missing_docs)]
    User,
    #[allow(missing_docs)]
    Book,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Book => write!(f, "book"),
        }
    }
}

/// Reference to a specific entity
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct EntityRef {
    /// Type of the entity
    pub kind: EntityKind,
    /// Object id of the entity
    pub id: String,
}

/// Structured description of a failure carried inside a [`Reply::Failure`]
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ErrorDetail {
    /// Category of the failure
    pub kind: FailureKind,
    /// Human readable description
    pub message: String,
    /// Entity the failure refers to, if any
    pub entity: Option<EntityRef>,
}

impl ErrorDetail {
    /// Creates a new detail without an entity reference
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            entity: None,
        }
    }

    /// Creates a [`FailureKind::NotFound`] detail referring to the missing entity
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        let id = id.into();

        Self {
            kind: FailureKind::NotFound,
            message: format!("{} {} not found", kind, id),
            entity: Some(EntityRef { kind, id }),
        }
    }

    /// Attaches an entity reference
    pub fn with_entity(mut self, kind: EntityKind, id: impl Into<String>) -> Self {
        self.entity = Some(EntityRef { kind, id: id.into() });
        self
    }
}

/// Response envelope which either carries the result of an operation or the reason why it failed
///
/// A `Failure` is a regular, successfully transmitted response. Transport-level problems never end up in here.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub enum Reply<T> {
    /// Operation succeeded
    Success(T),
    /// Operation failed for a business-level reason
    Failure(ErrorDetail),
}

impl<T> Reply<T> {
    /// Wraps a value into a [`Reply::Success`]
    pub fn success(value: T) -> Self {
        Reply::Success(value)
    }

    /// Wraps a detail into a [`Reply::Failure`]
    pub fn failure(detail: ErrorDetail) -> Self {
        Reply::Failure(detail)
    }

    /// Whether the `Success` variant is populated
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }

    /// Converts the envelope into a regular [`Result`]
    pub fn into_result(self) -> Result<T, ErrorDetail> {
        match self {
            Reply::Success(value) => Ok(value),
            Reply::Failure(detail) => Err(detail),
        }
    }
}

impl<T> From<Result<T, ErrorDetail>> for Reply<T> {
    fn from(result: Result<T, ErrorDetail>) -> Self {
        match result {
            Ok(value) => Reply::Success(value),
            Err(detail) => Reply::Failure(detail),
        }
    }
}
