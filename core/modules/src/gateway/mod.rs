//! HTTP traffic ingress translating REST calls into requests on the message bus
//!
//! Each call is forwarded as exactly one request, the reply is mapped back into
//! an HTTP response. Nothing is retried, a lost reply surfaces as `504 Gateway Timeout`.

use async_trait::async_trait;
use harness::{Heart, Module};
use jatsl::{schedule, Job, JobScheduler};
use library::communication::implementation::nats::NatsTransport;
use library::communication::request::ProfiledRequestor;
use library::{BoxedError, EmptyResult};
use tracing::{debug, instrument};

mod dto;
mod error;
mod mapper;
mod options;
mod proxy;

pub use options::Options;
pub use proxy::serve;

use self::proxy::ServerJob;

type GatewayRequestor = ProfiledRequestor<NatsTransport>;

/// Module implementation
pub struct Gateway {
    options: Options,
    transport: Option<NatsTransport>,
}

impl Gateway {
    /// Creates a new instance from raw parts
    pub fn new(options: Options) -> Self {
        Self {
            options,
            transport: None,
        }
    }
}

#[async_trait]
impl Module for Gateway {
    #[instrument(skip(self))]
    async fn pre_startup(&mut self) -> EmptyResult {
        debug!(url = %self.options.nats.url, "Connecting to message bus");

        let transport = self
            .options
            .nats
            .connect(
                crate::constants::CONNECTION_NAME_GATEWAY,
                self.options.request.request_timeout,
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

        let server_job = ServerJob::new(self.options.http.port, ProfiledRequestor::new(transport));

        debug!("Scheduling jobs");
        schedule!(scheduler, { server_job });

        Ok(Some(Heart::without_heart_stone()))
    }

    async fn pre_shutdown(&mut self, scheduler: &JobScheduler) {
        // Let in-flight requests complete their round-trip over the bus
        debug!("Gracefully shutting down HTTP server");
        scheduler
            .terminate_job(
                &ServerJob::<GatewayRequestor>::NAME.into(),
                self.options.http.termination_grace_period,
            )
            .await;
    }
}
