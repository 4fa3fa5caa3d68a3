//! Structures to communicate between services over a message bus
//!
//! There are two modes of operation:
//!
//! 1. Request and reply
//! 2. Fire-and-forget notifications
//!
//! The first one is what the HTTP ingress is built upon. A [`Request`](request::Request)
//! names the [`Subject`] it is sent to and the type of reply it expects. A
//! [`Requestor`](request::Requestor) publishes it with a private reply address, waits for exactly
//! one reply (or gives up after a deadline) and hands back the decoded response. Each call
//! owns its reply address, thus concurrent calls never observe each other's replies.
//!
//! The second mode is used whenever something noteworthy happened and other parties might be
//! interested. A [`Notification`](event::Notification) is published to its subject and nobody
//! answers. Failing to publish one is logged but never bubbles up to whoever caused the event.
//!
//! Both modes are built on top of raw traits operating on opaque bytes (see
//! [`RawRequestor`](request::RawRequestor) and [`RawNotificationPublisher`](event::RawNotificationPublisher)).
//! Serialization is layered on top by the marker traits in [`implementation::bincode`].

mod error;
mod transport;

pub mod event;
pub mod implementation;
pub mod request;

pub use error::ErrorTrace;
pub use transport::{IncomingMessage, RawSubscriber, Subject, TransportError};
