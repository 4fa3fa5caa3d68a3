//! Runnable modules each bundling multiple jobs and providing a unified configuration
//!
//! - [`gateway`] translates HTTP calls into requests on the message bus
//! - [`backend`] serves those requests from the catalog of users and books

#![deny(missing_docs)]
// Disable the lint for now as it has a high false-positive rate
#![allow(unknown_lints, clippy::nonstandard_macro_braces)]

pub mod options;

pub mod backend;
pub mod gateway;

pub mod constants;
