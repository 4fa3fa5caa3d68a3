//! Domain specific [`Notification`](library::communication::event::Notification) structures

mod book;

pub use book::*;
