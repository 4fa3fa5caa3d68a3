//! Structures to realise a request-reply pattern
//!
//! Two parties are involved:
//!
//! - Requesting side
//! - Responding side
//!
//! On the requesting side, a [`Requestor`] sends a [`Request`] to its [`Subject`](super::Subject)
//! and waits for the linked [`Request::Response`]. Exactly one message is published per call and
//! it is never repeated by this layer. If retrying is desired, it is up to the caller. Any
//! [`RawRequestor`] becomes a [`Requestor`] by implementing one of the serialization marker
//! traits in [`implementation`](super::implementation).
//!
//! On the responding side, a [`Responder`] subscribes to the subject of a [`Request`], hands
//! every incoming one to a [`RequestProcessor`] and publishes the returned response to the
//! reply address that came with the request.
//!
//! Note that a response may very well describe a failure (e.g. the requested entity does not exist).
//! This is not an error as far as this module is concerned, the reply has been received and decoded
//! just fine. Interpreting it is left to the consumer.

mod profiled;
#[allow(clippy::module_inception)]
mod request;
mod requestor;
mod responder;

pub use profiled::*;
pub use request::*;
pub use requestor::*;
pub use responder::*;
