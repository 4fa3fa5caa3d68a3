//! Serves user and book requests from the message bus
//!
//! Users and books are kept in memory. Whenever a book becomes available again a
//! [`BookAmountIncreasedNotification`](domain::event::BookAmountIncreasedNotification) is published.

use async_trait::async_trait;
use harness::{Heart, Module};
use jatsl::{schedule, JobScheduler};
use library::communication::implementation::nats::{NatsTransport, DEFAULT_REQUEST_TIMEOUT};
use library::{BoxedError, EmptyResult};
use std::sync::Arc;
use tracing::{debug, instrument};

mod catalog;
mod options;
mod processor;
mod service;

pub use catalog::{AmountChange, Catalog};
pub use options::Options;
pub use processor::CatalogProcessor;
pub use service::CatalogService;

use self::service::CatalogServiceJob;

/// Module implementation
pub struct Backend {
    options: Options,
    transport: Option<NatsTransport>,
}

impl Backend {
    /// Creates a new instance from raw parts
    pub fn new(options: Options) -> Self {
        Self {
            options,
            transport: None,
        }
    }
}

#[async_trait]
impl Module for Backend {
    #[instrument(skip(self))]
    async fn pre_startup(&mut self) -> EmptyResult {
        debug!(url = %self.options.nats.url, "Connecting to message bus");

        let transport = self
            .options
            .nats
            .connect(
                crate::constants::CONNECTION_NAME_BACKEND,
                DEFAULT_REQUEST_TIMEOUT,
            )
            .await?;

        self.transport = Some(transport);
        Ok(())
    }

    #[instrument(skip(self, scheduler))]
    async fn run(&mut self, scheduler: &JobScheduler) -> Result<Option<Heart>, BoxedError> {
        let transport = match &self.transport {
            Some(transport) => transport.clone(),
            None => return Err("message bus connection has not been established".into()),
        };

        let processor = CatalogProcessor::new(Arc::new(Catalog::default()), transport.clone());
        let service_job = CatalogServiceJob::new(CatalogService::new(transport, processor));

        debug!("Scheduling jobs");
        schedule!(scheduler, { service_job });

        Ok(Some(Heart::without_heart_stone()))
    }
}
