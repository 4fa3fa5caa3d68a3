//! Serialization and deserialization provided by [`bincode`](::bincode) using marker traits
//!
//! This module allows implementors of traits that allow raw access to underlying messaging systems
//! to provide the higher-level traits relying on serialization. Implementing a marker trait yields
//! a default implementation of the typed counterpart which translates between the bytes on the wire
//! and strongly typed messages. Exchanging the codec is a matter of implementing a different marker trait.

use super::super::event::{
    Notification, NotificationFrame, NotificationPublisher, RawNotificationPublisher,
};
use super::super::request::{RawRequestor, Request, RequestError, Requestor};
use crate::{BoxedError, EmptyResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

/// Serializes a value into its wire representation
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, BoxedError> {
    ::bincode::serialize(value).map_err(Into::into)
}

/// Parses a value from its wire representation
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BoxedError> {
    ::bincode::deserialize(bytes).map_err(Into::into)
}

/// Parses a notification including the frame it has been published in
pub fn decode_notification<N: Notification>(
    bytes: &[u8],
) -> Result<NotificationFrame<N>, BoxedError> {
    decode(bytes)
}

/// Marker trait providing a default [`Requestor`] implementation based on [`bincode`](::bincode)
pub trait BincodeRequestor: RawRequestor + Send + Sync {}

#[async_trait]
impl<T> Requestor for T
where
    T: BincodeRequestor,
{
    /// Serializes the request, sends it through [`RawRequestor::request_raw`] and deserializes the reply
    async fn request<R>(&self, request: &R) -> Result<R::Response, RequestError>
    where
        R: Request + Send + Sync,
        R::Response: Send,
    {
        let subject = R::subject();
        let payload = encode(request).map_err(|source| RequestError::Encode { subject, source })?;

        trace!(subject, bytes = payload.len(), "Sending request");
        let reply = self.request_raw(subject, payload).await?;

        decode(&reply).map_err(|source| RequestError::Decode { subject, source })
    }
}

/// Marker trait providing a default [`NotificationPublisher`] implementation based on [`bincode`](::bincode)
pub trait BincodeNotificationPublisher: RawNotificationPublisher + Send + Sync {}

#[async_trait]
impl<P> NotificationPublisher for P
where
    P: BincodeNotificationPublisher,
{
    /// Serializes the notification inside a [`NotificationFrame`]
    async fn publish<N: Notification + Send + Sync>(&self, notification: &N) -> EmptyResult {
        let data = encode(&NotificationFrame::new(notification))?;
        self.publish_raw(N::subject(), &data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod does {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    enum Outcome {
        Done(String),
        Broken { code: u16 },
    }

    #[test]
    fn preserve_tagged_unions() {
        for value in [Outcome::Done("yes".into()), Outcome::Broken { code: 404 }] {
            let bytes = encode(&value).unwrap();
            assert_eq!(decode::<Outcome>(&bytes).unwrap(), value);
        }
    }

    #[test]
    fn reject_truncated_payload() {
        let bytes = encode(&Outcome::Done("truncated".into())).unwrap();
        assert!(decode::<Outcome>(&bytes[..bytes.len() - 3]).is_err());
    }

    #[test]
    fn reject_unknown_variant() {
        let bytes = encode(&7u32).unwrap();
        assert!(decode::<Outcome>(&bytes).is_err());
    }
}
