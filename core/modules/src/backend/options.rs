use crate::options::NatsOptions;
use structopt::StructOpt;

/// Options for the backend module
#[derive(Debug, StructOpt)]
pub struct Options {
    #[allow(missing_docs)]
    #[structopt(flatten)]
    pub nats: NatsOptions,
}
