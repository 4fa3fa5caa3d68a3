use crate::BoxedError;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::time::Duration;
use thiserror::Error;

/// Name of a logical channel on the message bus (e.g. `user.find_by_id`)
///
/// Subjects follow the `<prefix>.<operation>` convention and have to match exactly
/// between the requesting and the responding side.
pub type Subject = &'static str;

/// Failure of the underlying messaging substrate
#[derive(Debug, Error)]
pub enum TransportError {
    /// No reply arrived on the reply address before the deadline
    #[error("no reply received on {subject} within {timeout:?}")]
    Timeout {
        /// Subject the request has been published to
        subject: String,
        /// Deadline that has been exceeded
        timeout: Duration,
    },
    /// Connection to the bus is not established or broke down mid-call
    #[error("message transport unavailable")]
    Unavailable(#[source] BoxedError),
}

impl TransportError {
    /// Wraps any error as [`TransportError::Unavailable`]
    pub fn unavailable<E>(error: E) -> Self
    where
        E: Into<BoxedError>,
    {
        Self::Unavailable(error.into())
    }
}

/// Raw message as delivered to a subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Subject on which the message was received
    pub subject: String,
    /// Address the sender is listening on for a reply, if any
    pub reply_to: Option<String>,
    /// Opaque, serialized content
    pub payload: Vec<u8>,
}

/// Structure which can listen for raw messages on a subject
#[async_trait]
pub trait RawSubscriber {
    /// Subscribes to a subject, the subscription is released when the stream is dropped
    async fn subscribe_raw(
        &self,
        subject: &str,
    ) -> Result<BoxStream<'static, IncomingMessage>, TransportError>;
}
