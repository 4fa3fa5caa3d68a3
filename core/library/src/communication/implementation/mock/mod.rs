//! Expectation based test doubles
//!
//! Test doubles in here panic as soon as they observe something they did not expect or
//! when they are dropped while expectations remain unfulfilled.

mod notification_publisher;
mod requestor;

pub use notification_publisher::*;
pub use requestor::*;
