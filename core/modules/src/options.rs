//! Various options usable by modules
//!
//! The structs in this module allow other modules to flatten them into
//! their own options struct. This allows for a unified yet non-cluttered
//! option set.

use library::communication::implementation::nats::NatsTransport;
use library::communication::TransportError;
use library::helpers::{parse_millis, parse_seconds};
use std::time::Duration;
use structopt::StructOpt;

/// Options for connecting to the NATS server
#[derive(Debug, StructOpt)]
pub struct NatsOptions {
    /// NATS server URL
    #[structopt(
        short = "n",
        long = "nats",
        env = "NATS",
        global = true,
        default_value = "nats://localhost:4222",
        value_name = "url"
    )]
    pub url: String,
}

impl NatsOptions {
    /// Establishes a new connection named after the calling module
    pub async fn connect(
        &self,
        name: &str,
        request_timeout: Duration,
    ) -> Result<NatsTransport, TransportError> {
        NatsTransport::connect(&self.url, name, request_timeout).await
    }
}

/// Options regarding outgoing requests
#[derive(Debug, StructOpt)]
pub struct RequestOptions {
    /// Milliseconds to wait for a reply before giving up on a request
    #[structopt(long, env, default_value = "5000", parse(try_from_str = parse_millis), value_name = "ms")]
    pub request_timeout: Duration,
}

/// Options for the HTTP server
#[derive(Debug, StructOpt)]
pub struct HttpOptions {
    /// Port on which HTTP requests are accepted
    #[structopt(long, env, default_value = "8080")]
    pub port: u16,

    /// Seconds in-flight HTTP requests are given to complete on shutdown
    #[structopt(long, env, default_value = "10", parse(try_from_str = parse_seconds), value_name = "s")]
    pub termination_grace_period: Duration,
}
