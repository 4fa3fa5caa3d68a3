//! Trait implementations using [`async_nats`]

use super::super::event::RawNotificationPublisher;
use super::super::request::RawRequestor;
use super::super::{IncomingMessage, RawSubscriber, TransportError};
use super::bincode::{BincodeNotificationPublisher, BincodeRequestor};
use async_nats::connection::State;
use async_nats::{Client, ConnectOptions};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, instrument, trace};

/// Deadline applied to requests unless configured otherwise
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
enum NatsTransportError {
    #[error("connection is not established (state: {0})")]
    NotConnected(String),
    #[error("reply subscription closed before a reply arrived")]
    SubscriptionClosed,
}

/// Multi-purpose transport implementation using a shared NATS connection
///
/// - [`RawRequestor`] by subscribing to a fresh inbox per request and publishing with it as reply address
/// - [`RawNotificationPublisher`] using plain [`PUB`](https://docs.nats.io/reference/reference-protocols/nats-protocol#pub)
/// - [`RawSubscriber`] using plain [`SUB`](https://docs.nats.io/reference/reference-protocols/nats-protocol#sub)
///
/// The underlying [`Client`] is a cheap handle to a multiplexed connection, cloning the transport
/// shares the very same connection.
#[derive(Clone)]
pub struct NatsTransport {
    client: Client,
    request_timeout: Duration,
}

impl NatsTransport {
    /// Creates a new instance from an existing client
    pub fn new(client: Client, request_timeout: Duration) -> Self {
        Self {
            client,
            request_timeout,
        }
    }

    /// Connects to the given server and names the connection after the calling service
    pub async fn connect(
        url: &str,
        name: &str,
        request_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = ConnectOptions::new()
            .name(name)
            .connect(url)
            .await
            .map_err(TransportError::unavailable)?;

        debug!(url, name, "Connected to NATS");
        Ok(Self::new(client, request_timeout))
    }

    /// Deadline after which requests are considered lost
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn ensure_connected(&self) -> Result<(), TransportError> {
        match self.client.connection_state() {
            State::Connected => Ok(()),
            state => Err(TransportError::unavailable(
                NatsTransportError::NotConnected(format!("{:?}", state)),
            )),
        }
    }
}

impl BincodeRequestor for NatsTransport {}
impl BincodeNotificationPublisher for NatsTransport {}

#[async_trait]
impl RawRequestor for NatsTransport {
    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    async fn request_raw(
        &self,
        subject: &str,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError> {
        self.ensure_connected()?;

        // The inbox is exclusive to this call so replies can't be delivered to anybody else
        let inbox = self.client.new_inbox();
        let mut subscription = self
            .client
            .subscribe(inbox.clone())
            .await
            .map_err(TransportError::unavailable)?;

        self.client
            .publish_with_reply(subject.to_owned(), inbox, Bytes::from(payload))
            .await
            .map_err(TransportError::unavailable)?;

        let reply = timeout(self.request_timeout, async {
            while let Some(message) = subscription.next().await {
                // Status messages (e.g. "no responders") are no replies, keep waiting for the deadline
                if let Some(status) = message.status {
                    trace!(?status, "Ignoring status message on reply subscription");
                    continue;
                }

                return Some(message.payload);
            }

            None
        })
        .await;

        if let Err(error) = subscription.unsubscribe().await {
            debug!(%error, "Reply subscription already released");
        }

        match reply {
            Ok(Some(payload)) => Ok(payload.to_vec()),
            Ok(None) => Err(TransportError::unavailable(
                NatsTransportError::SubscriptionClosed,
            )),
            Err(_) => Err(TransportError::Timeout {
                subject: subject.to_owned(),
                timeout: self.request_timeout,
            }),
        }
    }
}

#[async_trait]
impl RawNotificationPublisher for NatsTransport {
    async fn publish_raw(&self, subject: &str, payload: &[u8]) -> Result<(), TransportError> {
        self.ensure_connected()?;

        self.client
            .publish(subject.to_owned(), Bytes::copy_from_slice(payload))
            .await
            .map_err(TransportError::unavailable)
    }
}

#[async_trait]
impl RawSubscriber for NatsTransport {
    async fn subscribe_raw(
        &self,
        subject: &str,
    ) -> Result<BoxStream<'static, IncomingMessage>, TransportError> {
        let subscriber = self
            .client
            .subscribe(subject.to_owned())
            .await
            .map_err(TransportError::unavailable)?;

        let stream = subscriber
            .map(|message| IncomingMessage {
                subject: message.subject.to_string(),
                reply_to: message.reply.map(|reply| reply.to_string()),
                payload: message.payload.to_vec(),
            })
            .boxed();

        Ok(stream)
    }
}
