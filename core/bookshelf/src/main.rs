use anyhow::{bail, Result};
use harness::ModuleRunner;
use modules::backend::Backend;
use modules::gateway::Gateway;
use options::{Command, LogFormat};
use structopt::StructOpt;
use tracing::info;

mod options;

#[tokio::main]
async fn main() -> Result<()> {
    let (command, runner) = init()?;

    let termination_reason = match command {
        Command::Gateway(options) => runner.run(Gateway::new(options)).await,
        Command::Backend(options) => runner.run(Backend::new(options)).await,
    };

    if !termination_reason.is_clean() {
        bail!(termination_reason);
    }

    Ok(())
}

fn init() -> Result<(Command, ModuleRunner)> {
    let options = options::MainOptions::from_args();

    let formatter = tracing_subscriber::fmt().with_env_filter(options.log);

    match options.log_format {
        LogFormat::Text => formatter.init(),
        LogFormat::Compact => formatter.compact().init(),
        LogFormat::Json => formatter.json().init(),
    };

    let runner = match options.status_server {
        Some(port) => ModuleRunner::new_with_status_server(port),
        None => ModuleRunner::default(),
    };

    info!("Bookshelf {}", env!("CARGO_PKG_VERSION"));

    Ok((options.command, runner))
}
