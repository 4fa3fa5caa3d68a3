//! Implementations of traits from this module using third-party crates

pub mod bincode;
pub mod nats;

#[cfg(any(test, feature = "test"))]
pub mod memory;
#[cfg(any(test, feature = "test"))]
pub mod mock;
