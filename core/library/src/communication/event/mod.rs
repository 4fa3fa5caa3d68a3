//! Structures to publish event notifications
//!
//! Whenever something noteworthy happens in a service, a [`Notification`] describing
//! it may be published to the subject it declares. Publishing is fire-and-forget: nobody
//! replies and the publishing side does not learn whether anybody listened. Use the
//! [`FireAndForget`] wrapper when a failed publication should neither delay nor fail
//! the operation that triggered it.

mod fire_and_forget;
mod notification;
mod publisher;

pub use fire_and_forget::*;
pub use notification::*;
pub use publisher::*;
