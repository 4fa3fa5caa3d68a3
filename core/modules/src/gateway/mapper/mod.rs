//! Translation between HTTP representations and messages on the bus
//!
//! Outgoing translations are total. Incoming replies are inspected and a
//! [`Reply::Failure`] is turned into the matching [`DomainError`] at this boundary,
//! thus nothing downstream has to know about the wire format.

pub mod book;
pub mod user;

use domain::{DomainError, EntityKind, EntityRef, ErrorDetail, FailureKind, Reply};

/// Unwraps a reply, converting a failure into a [`DomainError`]
///
/// `requested` is consulted when a `NotFound` failure does not name the missing entity.
pub fn extract<T>(reply: Reply<T>, requested: Option<EntityRef>) -> Result<T, DomainError> {
    reply
        .into_result()
        .map_err(|detail| to_domain_error(detail, requested))
}

fn to_domain_error(detail: ErrorDetail, requested: Option<EntityRef>) -> DomainError {
    let ErrorDetail {
        kind,
        message,
        entity,
    } = detail;

    match kind {
        FailureKind::NotFound => match entity.or(requested) {
            Some(EntityRef {
                kind: EntityKind::User,
                id,
            }) => DomainError::UserNotFound { id },
            Some(EntityRef {
                kind: EntityKind::Book,
                id,
            }) => DomainError::BookNotFound { id },
            None => DomainError::RemoteOperationFailed { message },
        },
        FailureKind::Conflict => DomainError::Conflict {
            message,
            id: entity.map(|e| e.id),
        },
        FailureKind::ValidationFailed => DomainError::ValidationFailed { message },
        FailureKind::Internal => DomainError::RemoteOperationFailed { message },
    }
}

fn requested(kind: EntityKind, id: &str) -> Option<EntityRef> {
    Some(EntityRef {
        kind,
        id: id.to_owned(),
    })
}

#[cfg(test)]
mod does {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prefer_entity_named_by_the_failure() {
        let reply: Reply<()> = Reply::failure(ErrorDetail::not_found(EntityKind::Book, "b"));

        assert_eq!(
            extract(reply, requested(EntityKind::User, "u")),
            Err(DomainError::BookNotFound { id: "b".into() })
        );
    }

    #[test]
    fn fall_back_to_requested_entity() {
        let reply: Reply<()> = Reply::failure(ErrorDetail::new(FailureKind::NotFound, "gone"));

        assert_eq!(
            extract(reply, requested(EntityKind::User, "u")),
            Err(DomainError::UserNotFound { id: "u".into() })
        );
    }

    #[test]
    fn map_not_found_without_any_entity_to_remote_failure() {
        let reply: Reply<()> = Reply::failure(ErrorDetail::new(FailureKind::NotFound, "gone"));

        assert_eq!(
            extract(reply, None),
            Err(DomainError::RemoteOperationFailed {
                message: "gone".into()
            })
        );
    }

    #[test]
    fn keep_message_of_conflicts() {
        let detail = ErrorDetail::new(FailureKind::Conflict, "login bob is taken")
            .with_entity(EntityKind::User, "u");

        assert_eq!(
            extract(Reply::<()>::failure(detail), None),
            Err(DomainError::Conflict {
                message: "login bob is taken".into(),
                id: Some("u".into())
            })
        );
    }

    #[test]
    fn map_validation_and_internal_failures() {
        let validation = ErrorDetail::new(FailureKind::ValidationFailed, "negative");
        let internal = ErrorDetail::new(FailureKind::Internal, "disk on fire");

        assert_eq!(
            extract(Reply::<()>::failure(validation), None),
            Err(DomainError::ValidationFailed {
                message: "negative".into()
            })
        );
        assert_eq!(
            extract(Reply::<()>::failure(internal), None),
            Err(DomainError::RemoteOperationFailed {
                message: "disk on fire".into()
            })
        );
    }

    #[test]
    fn pass_through_success() {
        assert_eq!(extract(Reply::success(7), None), Ok(7));
    }
}
