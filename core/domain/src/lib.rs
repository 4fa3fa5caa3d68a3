//! Domain specific messages, subjects and errors shared by the gateway and the backend
//!
//! Every operation of the backend is described by a [`Request`](library::communication::request::Request)
//! in either the [`user`] or the [`book`] module. Responses are wrapped in a [`Reply`] which either carries
//! the result or an [`ErrorDetail`] describing a business-level failure. The latter is turned into a
//! [`DomainError`] by whoever consumes the reply.

#![deny(missing_docs)]
// Disable the lint for now as it has a high false-positive rate
#![allow(unknown_lints, clippy::nonstandard_macro_braces)]

mod error;
mod identifier;
mod reply;

pub mod book;
pub mod event;
pub mod user;

pub use error::DomainError;
pub use identifier::{is_object_id, new_object_id, OBJECT_ID_LENGTH};
pub use reply::{EntityKind, EntityRef, ErrorDetail, FailureKind, Reply};
