//! Independent and project agnostic libraries
//!
//! Nothing in here knows about books or users. The [`communication`] module provides the
//! request/reply and notification plumbing on top of a message bus while [`http`] contains
//! the building blocks for the HTTP ingress. Everything domain specific lives in the `domain` crate.

#![deny(missing_docs)]
// Disable the lint for now as it has a high false-positive rate
#![allow(unknown_lints, clippy::nonstandard_macro_braces)]

pub mod communication;
pub mod helpers;
pub mod http;

/// Generic error type
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result with no value and a [`BoxedError`]
pub type EmptyResult = Result<(), BoxedError>;
