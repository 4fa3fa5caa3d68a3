//! Runtime harness to execute modules and manage their lifecycle

#![deny(missing_docs)]
// Disable the lint for now as it has a high false-positive rate
#![allow(unknown_lints, clippy::nonstandard_macro_braces)]

mod heart;
mod module;

pub use heart::*;
pub use module::*;
