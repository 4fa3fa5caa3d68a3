use super::error::GatewayError;
use async_trait::async_trait;
use futures::Future;
use hyper::Server;
use jatsl::Job;
use library::communication::request::Requestor;
use library::{make_responder_chain_service_fn, BoxedError, EmptyResult};
use std::net::{SocketAddr, TcpListener};
use tracing::info;

use self::{book::BookResponder, user::UserResponder};

mod book;
mod user;

fn validated_id(id: &str) -> Result<&str, GatewayError> {
    if domain::is_object_id(id) {
        Ok(id)
    } else {
        Err(GatewayError::InvalidId(id.to_owned()))
    }
}

fn validated_ids<'a, I>(ids: I) -> Result<(), GatewayError>
where
    I: IntoIterator<Item = &'a String>,
{
    ids.into_iter().try_for_each(|id| validated_id(id).map(|_| ()))
}

/// Serves the HTTP interface on an already bound listener until the shutdown future resolves
///
/// In-flight requests are completed before this function returns.
pub async fn serve<R, F>(listener: TcpListener, requestor: R, shutdown: F) -> EmptyResult
where
    R: Requestor + Clone + Send + Sync + 'static,
    F: Future<Output = ()>,
{
    let user_responder = UserResponder::new(requestor.clone());
    let book_responder = BookResponder::new(requestor);

    let make_svc = make_responder_chain_service_fn! {
        user_responder,
        book_responder
    };

    let server = Server::from_tcp(listener)?.serve(make_svc);
    server.with_graceful_shutdown(shutdown).await?;

    Ok(())
}

pub struct ServerJob<R> {
    port: u16,
    requestor: R,
}

impl<R> ServerJob<R> {
    pub fn new(port: u16, requestor: R) -> Self {
        Self { port, requestor }
    }
}

#[async_trait]
impl<R> Job for ServerJob<R>
where
    R: Requestor + Clone + Send + Sync + 'static,
{
    const NAME: &'static str = module_path!();
    const SUPPORTS_GRACEFUL_TERMINATION: bool = true;

    async fn execute(&self, manager: jatsl::JobManager) -> Result<(), BoxedError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)?;

        info!(?addr, "Serving bookshelf gateway");
        manager.ready().await;

        serve(listener, self.requestor.clone(), manager.termination_signal()).await
    }
}
