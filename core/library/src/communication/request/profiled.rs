use super::{Request, RequestError, Requestor};
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, warn};

/// [`Requestor`] decorator which logs the duration and outcome of every request
#[derive(Clone)]
pub struct ProfiledRequestor<R> {
    inner: R,
}

impl<R> ProfiledRequestor<R> {
    /// Wraps an existing requestor
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Consumes the decorator, returning the wrapped requestor
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[async_trait]
impl<I> Requestor for ProfiledRequestor<I>
where
    I: Requestor + Send + Sync,
{
    async fn request<R>(&self, request: &R) -> Result<R::Response, RequestError>
    where
        R: Request + Send + Sync,
        R::Response: Send,
    {
        let start = Instant::now();
        let result = self.inner.request(request).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => debug!(subject = R::subject(), elapsed_ms, "Request completed"),
            Err(error) => warn!(subject = R::subject(), elapsed_ms, %error, "Request failed"),
        }

        result
    }
}
