//! In-process message broker with NATS-like semantics
//!
//! Useful for wiring up both ends of a request-reply exchange in tests without running a server.
//! Subjects are matched exactly (no wildcards), every subscriber of a subject receives every message
//! published to it and subscriptions are released when their stream is dropped.

use super::super::event::RawNotificationPublisher;
use super::super::request::RawRequestor;
use super::super::{IncomingMessage, RawSubscriber, TransportError};
use super::bincode::{BincodeNotificationPublisher, BincodeRequestor};
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::time::timeout;

/// Prefix of reply addresses handed out by [`MemoryTransport`]
pub const INBOX_PREFIX: &str = "_INBOX.";

/// Source of reply address tokens, shared by all brokers in the process
static NEXT_INBOX: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error)]
enum MemoryBrokerError {
    #[error("broker has been disconnected")]
    Disconnected,
    #[error("reply subscription closed before a reply arrived")]
    SubscriptionClosed,
}

#[derive(Default)]
struct BrokerState {
    next_subscription: u64,
    subscriptions: HashMap<String, HashMap<u64, UnboundedSender<IncomingMessage>>>,
    published: HashMap<String, usize>,
}

struct BrokerInner {
    connected: AtomicBool,
    state: Mutex<BrokerState>,
}

/// Shared in-memory broker, clones refer to the same broker
#[derive(Clone)]
pub struct MemoryBroker {
    inner: Arc<BrokerInner>,
}

impl Default for MemoryBroker {
    fn default() -> Self {
        Self {
            inner: Arc::new(BrokerInner {
                connected: AtomicBool::new(true),
                state: Mutex::new(BrokerState::default()),
            }),
        }
    }
}

impl MemoryBroker {
    /// Creates a transport handle which uses the given deadline for requests
    pub fn transport(&self, request_timeout: Duration) -> MemoryTransport {
        MemoryTransport {
            broker: self.clone(),
            request_timeout,
        }
    }

    /// Simulates a connection loss (or recovery) for all handles of this broker
    pub fn set_connected(&self, connected: bool) {
        self.inner.connected.store(connected, Ordering::SeqCst);
    }

    /// Number of currently active subscriptions across all subjects
    pub fn subscription_count(&self) -> usize {
        self.lock().subscriptions.values().map(HashMap::len).sum()
    }

    /// Number of messages published to the given subject so far
    pub fn published(&self, subject: &str) -> usize {
        self.lock().published.get(subject).copied().unwrap_or(0)
    }

    /// Subscribes to an exact subject
    pub fn subscribe(&self, subject: &str) -> Result<MemorySubscription, TransportError> {
        self.ensure_connected()?;

        let (tx, rx) = unbounded_channel();
        let mut state = self.lock();
        let id = state.next_subscription;
        state.next_subscription += 1;
        state
            .subscriptions
            .entry(subject.to_owned())
            .or_default()
            .insert(id, tx);

        Ok(MemorySubscription {
            id,
            subject: subject.to_owned(),
            rx,
            broker: self.clone(),
        })
    }

    /// Delivers a message to all current subscribers of the subject
    pub fn publish(
        &self,
        subject: &str,
        reply_to: Option<String>,
        payload: Vec<u8>,
    ) -> Result<(), TransportError> {
        self.ensure_connected()?;

        let mut state = self.lock();
        *state.published.entry(subject.to_owned()).or_default() += 1;

        if let Some(subscribers) = state.subscriptions.get(subject) {
            for tx in subscribers.values() {
                let message = IncomingMessage {
                    subject: subject.to_owned(),
                    reply_to: reply_to.clone(),
                    payload: payload.clone(),
                };

                // A closed receiver is about to unregister itself
                let _ = tx.send(message);
            }
        }

        Ok(())
    }

    fn unsubscribe(&self, subject: &str, id: u64) {
        let mut state = self.lock();

        if let Some(subscribers) = state.subscriptions.get_mut(subject) {
            subscribers.remove(&id);

            if subscribers.is_empty() {
                state.subscriptions.remove(subject);
            }
        }
    }

    fn ensure_connected(&self) -> Result<(), TransportError> {
        if self.inner.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(TransportError::unavailable(MemoryBrokerError::Disconnected))
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BrokerState> {
        // Poisoning only happens when a test already panicked
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Active subscription on a [`MemoryBroker`], unregisters itself when dropped
pub struct MemorySubscription {
    id: u64,
    subject: String,
    rx: UnboundedReceiver<IncomingMessage>,
    broker: MemoryBroker,
}

impl Stream for MemorySubscription {
    type Item = IncomingMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for MemorySubscription {
    fn drop(&mut self) {
        self.broker.unsubscribe(&self.subject, self.id);
    }
}

/// Transport handle to a [`MemoryBroker`]
#[derive(Clone)]
pub struct MemoryTransport {
    broker: MemoryBroker,
    request_timeout: Duration,
}

impl MemoryTransport {
    /// Broker this handle is attached to
    pub fn broker(&self) -> &MemoryBroker {
        &self.broker
    }
}

impl BincodeRequestor for MemoryTransport {}
impl BincodeNotificationPublisher for MemoryTransport {}

#[async_trait]
impl RawRequestor for MemoryTransport {
    async fn request_raw(
        &self,
        subject: &str,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError> {
        let inbox = format!(
            "{}{}",
            INBOX_PREFIX,
            NEXT_INBOX.fetch_add(1, Ordering::SeqCst)
        );

        let mut subscription = self.broker.subscribe(&inbox)?;
        self.broker.publish(subject, Some(inbox), payload)?;

        let reply = timeout(self.request_timeout, subscription.next()).await;
        drop(subscription);

        match reply {
            Ok(Some(message)) => Ok(message.payload),
            Ok(None) => Err(TransportError::unavailable(
                MemoryBrokerError::SubscriptionClosed,
            )),
            Err(_) => Err(TransportError::Timeout {
                subject: subject.to_owned(),
                timeout: self.request_timeout,
            }),
        }
    }
}

#[async_trait]
impl RawNotificationPublisher for MemoryTransport {
    async fn publish_raw(&self, subject: &str, payload: &[u8]) -> Result<(), TransportError> {
        self.broker.publish(subject, None, payload.to_vec())
    }
}

#[async_trait]
impl RawSubscriber for MemoryTransport {
    async fn subscribe_raw(
        &self,
        subject: &str,
    ) -> Result<BoxStream<'static, IncomingMessage>, TransportError> {
        Ok(self.broker.subscribe(subject)?.boxed())
    }
}

#[cfg(test)]
mod does {
    use super::*;
    use crate::communication::request::{RequestError, Requestor};
    use crate::communication::request::Request;
    use crate::communication::Subject;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    const TIMEOUT: Duration = Duration::from_secs(2);

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Echo(String);

    impl Request for Echo {
        type Response = String;

        fn subject() -> Subject {
            "test.echo"
        }
    }

    /// Answers every request on `test.echo` with the request content, in reverse arrival order once `batch` requests arrived
    fn spawn_batched_echo(broker: &MemoryBroker, batch: usize) {
        let mut subscription = broker.subscribe(Echo::subject()).unwrap();
        let broker = broker.clone();

        tokio::spawn(async move {
            let mut pending = Vec::new();

            while let Some(message) = subscription.next().await {
                pending.push(message);

                if pending.len() == batch {
                    for message in pending.drain(..).rev() {
                        let request: Echo = super::super::bincode::decode(&message.payload).unwrap();
                        let reply = super::super::bincode::encode(&request.0).unwrap();
                        broker.publish(&message.reply_to.unwrap(), None, reply).unwrap();
                    }
                }
            }
        });
    }

    #[tokio::test]
    async fn resolve_with_reply() {
        let broker = MemoryBroker::default();
        spawn_batched_echo(&broker, 1);

        let transport = broker.transport(TIMEOUT);
        let response = transport.request(&Echo("hello".into())).await.unwrap();

        assert_eq!(response, "hello");
        assert_eq!(broker.published(Echo::subject()), 1);
    }

    #[tokio::test]
    async fn not_cross_deliver_concurrent_replies() {
        let broker = MemoryBroker::default();
        spawn_batched_echo(&broker, 2);

        let transport = broker.transport(TIMEOUT);
        let a = Echo("a".into());
        let b = Echo("b".into());
        let (reply_a, reply_b) = tokio::join!(transport.request(&a), transport.request(&b));

        assert_eq!(reply_a.unwrap(), "a");
        assert_eq!(reply_b.unwrap(), "b");
    }

    #[tokio::test]
    async fn time_out_without_listener() {
        let broker = MemoryBroker::default();
        let transport = broker.transport(Duration::from_millis(50));

        let result = transport.request(&Echo("anyone?".into())).await;

        assert!(matches!(result, Err(RequestError::Timeout { .. })));
        assert_eq!(broker.subscription_count(), 0);
    }

    #[tokio::test]
    async fn release_subscription_when_cancelled() {
        let broker = MemoryBroker::default();
        let _listener = broker.subscribe(Echo::subject()).unwrap();
        let transport = broker.transport(TIMEOUT);

        let request = Echo("never answered".into());
        let cancelled = timeout(Duration::from_millis(20), transport.request(&request)).await;

        assert!(cancelled.is_err());
        assert_eq!(broker.subscription_count(), 1);
    }

    #[tokio::test]
    async fn fail_when_disconnected() {
        let broker = MemoryBroker::default();
        broker.set_connected(false);

        let result = broker.transport(TIMEOUT).request(&Echo("x".into())).await;

        assert!(matches!(result, Err(RequestError::TransportUnavailable(_))));
        assert_eq!(broker.published(Echo::subject()), 0);
    }

    #[tokio::test]
    async fn fail_on_undecodable_reply() {
        let broker = MemoryBroker::default();
        let mut listener = broker.subscribe(Echo::subject()).unwrap();
        let responder = broker.clone();

        tokio::spawn(async move {
            let message = listener.next().await.unwrap();
            responder
                .publish(&message.reply_to.unwrap(), None, vec![0xff])
                .unwrap();
        });

        let result = broker.transport(TIMEOUT).request(&Echo("x".into())).await;

        assert!(matches!(result, Err(RequestError::Decode { .. })));
    }
}
