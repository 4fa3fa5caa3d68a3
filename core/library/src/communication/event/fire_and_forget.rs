use super::{Notification, NotificationPublisher};
use std::any::type_name;
use tracing::{trace, warn};

/// Publishes notifications in the background, logging rather than returning failures
///
/// Requires a tokio runtime to be present when [`send`](FireAndForget::send) is called.
#[derive(Clone)]
pub struct FireAndForget<P> {
    publisher: P,
}

impl<P> FireAndForget<P>
where
    P: NotificationPublisher + Clone + Send + Sync + 'static,
{
    /// Wraps an existing publisher
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    /// Dispatches the notification without waiting for it to be published
    pub fn send<N>(&self, notification: N)
    where
        N: Notification + Send + Sync + 'static,
    {
        let publisher = self.publisher.clone();

        tokio::spawn(async move {
            match publisher.publish(&notification).await {
                Ok(()) => trace!(subject = N::subject(), "Published notification"),
                Err(error) => warn!(
                    subject = N::subject(),
                    notification = type_name::<N>(),
                    %error,
                    "Failed to publish notification"
                ),
            }
        });
    }
}
