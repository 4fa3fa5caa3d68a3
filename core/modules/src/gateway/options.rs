use crate::options::{HttpOptions, NatsOptions, RequestOptions};
use structopt::StructOpt;

/// Options for the gateway module
#[derive(Debug, StructOpt)]
pub struct Options {
    #[allow(missing_docs)]
    #[structopt(flatten)]
    pub nats: NatsOptions,

    #[allow(missing_docs)]
    #[structopt(flatten)]
    pub request: RequestOptions,

    #[allow(missing_docs)]
    #[structopt(flatten)]
    pub http: HttpOptions,
}
