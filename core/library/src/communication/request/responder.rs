use super::super::event::RawNotificationPublisher;
use super::super::implementation::bincode::{decode, encode};
use super::super::{IncomingMessage, RawSubscriber, TransportError};
use super::Request;
use crate::{BoxedError, EmptyResult};
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{pin_mut, select, Future, FutureExt, StreamExt};
use std::marker::PhantomData;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Number of requests a single [`Responder`] processes simultaneously
const CONCURRENCY_LIMIT: usize = 64;

/// Error that may be thrown while responding to a request
#[derive(Error, Debug)]
pub enum ResponderError {
    /// Incoming payload is not a valid request
    #[error("unable to decode request on {0}")]
    Undecodable(String, #[source] BoxedError),
    /// Sender did not provide an address to reply to
    #[error("request on {0} carries no reply address")]
    MissingReplyAddress(String),
    /// The [`RequestProcessor`] threw an error
    #[error("processing request failed")]
    ProcessingFailed(#[source] BoxedError),
    /// Unable to serialize the response
    #[error("unable to encode response")]
    Unencodable(#[source] BoxedError),
    /// Unable to deliver the response
    #[error("sending response failed")]
    ResponseUndeliverable(#[source] BoxedError),
}

/// Structure which processes requests and produces responses
///
/// Returning `Err(_)` is reserved for system failures. No response will be sent in that case
/// and the requesting side runs into its timeout. Subject specific failures (like a missing entity)
/// should be expressed through the response type instead!
#[async_trait]
pub trait RequestProcessor<R: Request> {
    /// Handler for requests, returning a response
    async fn process(&self, request: R) -> Result<R::Response, BoxedError>;
}

/// Convenience wrapper to receive requests, process them and send responses
pub struct Responder<R, P> {
    processor: P,
    request: PhantomData<fn(R)>,
}

impl<R, P> Responder<R, P>
where
    R: Request + Send + Sync,
    R::Response: Send + Sync,
    P: RequestProcessor<R> + Send + Sync,
{
    /// Creates a new responder from raw parts
    pub fn new(processor: P) -> Self {
        Self {
            processor,
            request: PhantomData,
        }
    }

    /// Handles a single incoming message and returns the reply
    pub async fn respond<T>(&self, transport: &T, message: IncomingMessage) -> EmptyResult
    where
        T: RawNotificationPublisher + Send + Sync,
    {
        let reply_to = message
            .reply_to
            .ok_or_else(|| ResponderError::MissingReplyAddress(message.subject.clone()))?;

        let request: R = decode(&message.payload)
            .map_err(|e| ResponderError::Undecodable(message.subject, e))?;

        let response = self
            .processor
            .process(request)
            .await
            .map_err(ResponderError::ProcessingFailed)?;

        let payload = encode(&response).map_err(ResponderError::Unencodable)?;

        transport
            .publish_raw(&reply_to, &payload)
            .await
            .map_err(|e| ResponderError::ResponseUndeliverable(e.into()))?;

        Ok(())
    }

    /// Subscribes to the request subject and serves requests until the termination future resolves
    ///
    /// Failures of individual requests are logged and do not stop the responder.
    pub async fn serve<T, F>(&self, transport: &T, termination: F) -> EmptyResult
    where
        T: RawSubscriber + RawNotificationPublisher + Send + Sync,
        F: Future<Output = ()> + Send,
    {
        let subscription = self.subscribe(transport).await?;
        self.serve_subscription(transport, subscription, termination)
            .await;

        Ok(())
    }

    /// Subscribes to the request subject without processing anything yet
    pub async fn subscribe<T>(
        &self,
        transport: &T,
    ) -> Result<BoxStream<'static, IncomingMessage>, TransportError>
    where
        T: RawSubscriber + Send + Sync,
    {
        transport.subscribe_raw(R::subject()).await
    }

    /// Serves requests from an existing subscription until it ends or the termination future resolves
    pub async fn serve_subscription<T, F>(
        &self,
        transport: &T,
        subscription: BoxStream<'static, IncomingMessage>,
        termination: F,
    ) where
        T: RawNotificationPublisher + Send + Sync,
        F: Future<Output = ()> + Send,
    {
        let subject = R::subject();
        info!(subject, "Serving requests");

        let processing = subscription
            .for_each_concurrent(CONCURRENCY_LIMIT, |message| async move {
                trace!(subject, reply_to = ?message.reply_to, "Received request");

                if let Err(error) = self.respond(transport, message).await {
                    warn!(subject, %error, "Unable to respond to request");
                }
            })
            .fuse();

        let termination = termination.fuse();
        pin_mut!(processing, termination);

        select! {
            _ = processing => debug!(subject, "Subscription ended"),
            _ = termination => debug!(subject, "Responder terminated"),
        }
    }
}

#[cfg(test)]
mod does {
    use super::*;
    use crate::communication::implementation::memory::MemoryBroker;
    use crate::communication::request::{RawRequestor, RequestError, Requestor};
    use crate::communication::Subject;
    use futures::channel::oneshot;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Double(u32);

    impl Request for Double {
        type Response = u32;

        fn subject() -> Subject {
            "test.double"
        }
    }

    struct Doubler;

    #[async_trait]
    impl RequestProcessor<Double> for Doubler {
        async fn process(&self, request: Double) -> Result<u32, BoxedError> {
            if request.0 == 0 {
                Err("refusing to double nothing".into())
            } else {
                Ok(request.0 * 2)
            }
        }
    }

    #[tokio::test]
    async fn answer_requests() {
        let broker = MemoryBroker::default();
        let server = broker.transport(Duration::from_secs(1));
        let client = broker.transport(Duration::from_secs(1));
        let (stop, stopped) = oneshot::channel::<()>();

        let responder = Responder::new(Doubler);
        let subscription = responder.subscribe(&server).await.unwrap();

        let serving = tokio::spawn(async move {
            responder
                .serve_subscription(&server, subscription, async move {
                    stopped.await.ok();
                })
                .await
        });

        assert_eq!(client.request(&Double(21)).await.unwrap(), 42);

        stop.send(()).unwrap();
        serving.await.unwrap();
    }

    #[tokio::test]
    async fn stay_silent_on_processing_failure() {
        let broker = MemoryBroker::default();
        let server = broker.transport(Duration::from_secs(1));
        let client = broker.transport(Duration::from_millis(50));

        let responder = Responder::new(Doubler);
        let subscription = responder.subscribe(&server).await.unwrap();

        tokio::spawn(async move {
            responder
                .serve_subscription(&server, subscription, futures::future::pending())
                .await
        });

        let result = client.request(&Double(0)).await;
        assert!(matches!(result, Err(RequestError::Timeout { .. })));

        // Undecodable requests are dropped as well while the responder keeps going
        let garbage = client.request_raw("test.double", vec![0xff]).await;
        assert!(garbage.is_err());
        assert_eq!(client.request(&Double(2)).await.unwrap(), 4);
    }
}
