use super::super::{Subject, TransportError};
use super::Request;
use crate::BoxedError;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Structure which publishes opaque payloads and waits for a single reply
///
/// Implementations create a reply address that is exclusive to one call, publish the payload with it
/// and resolve with the first payload received on that address. The address is released once the reply
/// arrived, the configured deadline passed, or the returned future got dropped.
#[async_trait]
pub trait RawRequestor {
    /// Sends a payload to the given subject and waits for the reply
    async fn request_raw(&self, subject: &str, payload: Vec<u8>)
        -> Result<Vec<u8>, TransportError>;
}

/// Error type for sending requests
#[derive(Error, Debug)]
pub enum RequestError {
    /// Request could not be serialized
    #[error("unable to encode request for {subject}")]
    Encode {
        /// Subject the request was meant for
        subject: Subject,
        /// Underlying codec error
        #[source]
        source: BoxedError,
    },
    /// No response arrived in time
    #[error("no response from {subject} within {timeout:?}")]
    Timeout {
        /// Subject the request has been sent to
        subject: String,
        /// Deadline that has been exceeded
        timeout: Duration,
    },
    /// Message bus connection is not usable
    #[error("message transport unavailable")]
    TransportUnavailable(#[source] BoxedError),
    /// Response arrived but could not be parsed into the expected type
    #[error("unable to decode response from {subject}")]
    Decode {
        /// Subject the request has been sent to
        subject: Subject,
        /// Underlying codec error
        #[source]
        source: BoxedError,
    },
}

impl From<TransportError> for RequestError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Timeout { subject, timeout } => Self::Timeout { subject, timeout },
            TransportError::Unavailable(source) => Self::TransportUnavailable(source),
        }
    }
}

impl RequestError {
    /// Whether repeating the request might yield a different outcome
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            RequestError::Timeout { .. } | RequestError::TransportUnavailable(_)
        )
    }
}

/// Handler for sending requests and receiving their response
#[async_trait]
pub trait Requestor {
    /// Sends out a request and awaits its response
    async fn request<R>(&self, request: &R) -> Result<R::Response, RequestError>
    where
        R: Request + Send + Sync,
        R::Response: Send;
}
