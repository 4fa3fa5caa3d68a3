use super::super::TransportError;
use super::Notification;
use crate::EmptyResult;
use async_trait::async_trait;

/// Structure which allows publishing of serialized data to a subject
#[async_trait]
pub trait RawNotificationPublisher {
    /// Sends an opaque payload to a subject without expecting a reply
    async fn publish_raw(&self, subject: &str, payload: &[u8]) -> Result<(), TransportError>;
}

/// Publisher for [`Notifications`](Notification)
#[async_trait]
pub trait NotificationPublisher {
    /// Publishes a [`Notification`] to its designated subject
    async fn publish<N: Notification + Send + Sync>(&self, notification: &N) -> EmptyResult;
}
