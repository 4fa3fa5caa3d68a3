use crate::communication::event::{Notification, NotificationPublisher};
use crate::EmptyResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// [`NotificationPublisher`] which records everything published through it
#[derive(Default)]
pub struct MockNotificationPublisher {
    published: Mutex<Vec<(&'static str, Value)>>,
}

impl MockNotificationPublisher {
    /// Notifications of the given type published so far, in order of publication
    pub fn published<N: Notification>(&self) -> Vec<N> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .filter(|(subject, _)| *subject == N::subject())
            .map(|(_, value)| serde_json::from_value(value.clone()).unwrap())
            .collect()
    }

    /// Total number of notifications published so far
    pub fn count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationPublisher for Arc<MockNotificationPublisher> {
    async fn publish<N: Notification + Send + Sync>(&self, notification: &N) -> EmptyResult {
        let value = serde_json::to_value(notification)?;
        self.published.lock().unwrap().push((N::subject(), value));
        Ok(())
    }
}
