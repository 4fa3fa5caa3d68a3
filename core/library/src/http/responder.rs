use async_trait::async_trait;
use futures::Future;
use hyper::{
    http::{request::Parts, Response, StatusCode},
    Body,
};
use std::convert::Infallible;
use std::net::IpAddr;
use tracing::warn;

use super::ErrorBody;

/// Handler for incoming HTTP requests which may be chained
///
/// Responders either handle a request or pass it on to the `next` one in the chain.
/// A request reaching the end of the chain is answered with a `404 Not Found`.
#[async_trait]
pub trait Responder {
    /// Executes the responder on the parts of a request
    async fn respond<F, Fut>(
        &self,
        parts: Parts,
        body: Body,
        client_ip: IpAddr,
        next: F,
    ) -> Result<Response<Body>, Infallible>
    where
        Fut: Future<Output = Result<Response<Body>, Infallible>> + Send,
        F: FnOnce(Parts, Body, IpAddr) -> Fut + Send;
}

/// Terminal handler for requests no responder felt responsible for
#[doc(hidden)]
pub fn unhandled_response(parts: &Parts, ip: IpAddr) -> Response<Body> {
    let method = parts.method.to_string();
    let path = parts.uri.path().to_owned();
    warn!(?ip, ?method, ?path, "No responder handled request");

    ErrorBody::new("NotFound", vec![format!("no route for {} {}", method, path)])
        .into_response(StatusCode::NOT_FOUND)
}

/// Chains together a number of `Responder` implementations
#[macro_export]
macro_rules! responder_chain {
    ($parts:expr, $body:expr, $ip:expr, { $first:ident, $($rest:tt)+ }) => {{
        use $crate::http::Responder as _;

        $first.respond($parts, $body, $ip, move |p, b, i| {
            async move {
                $crate::responder_chain!(p, b, i, { $($rest)+ }).await
            }
        })
    }};

    ($parts:expr, $body:expr, $ip:expr, { $last:ident$(,)? }) => {{
        use $crate::http::Responder as _;

        $last.respond($parts, $body, $ip, move |parts, _, ip| async move {
            Ok($crate::http::unhandled_response(&parts, ip))
        })
    }};
}

/// Combines a number of responder instances and creates a new hyper service function
/// through the use of [`make_service_fn`](hyper::service::make_service_fn). To allow
/// for concurrent access to the responders in the chain, they are wrapped in [`Arc`](std::sync::Arc) pointer types.
#[macro_export]
macro_rules! make_responder_chain_service_fn {
    ( $($responder:ident$(,)? )+ ) => {
        {
            use hyper::{server::conn::AddrStream, service::{make_service_fn, service_fn}};
            use std::{sync::Arc, convert::Infallible};
            use tracing::debug;

            paste::paste! {
                $(
                    let [<arc_ $responder>] = Arc::new($responder);
                )+

                make_service_fn(move |conn: &AddrStream| {
                    let addr = conn.remote_addr();

                    $(
                        let [<arc_ $responder>] = [<arc_ $responder>].clone();
                    )+

                    async move {
                        Ok::<_, Infallible>(service_fn(move |req| {
                            $(
                                let [<arc_ $responder>] = [<arc_ $responder>].clone();
                            )+

                            async move {
                                let (parts, body) = req.into_parts();
                                let ip = addr.ip();

                                debug!(?ip, method = %parts.method, path = parts.uri.path(), "Received request");

                                $crate::responder_chain!(parts, body, ip, {
                                    $(
                                        [<arc_ $responder>],
                                    )+
                                }).await
                            }
                        }))
                    }
                })
            }
        }
    };
}

pub use make_responder_chain_service_fn;
pub use responder_chain;

#[cfg(test)]
mod does {
    use super::*;
    use hyper::http::{Method, Request};
    use std::net::Ipv4Addr;

    struct PathResponder(&'static str);

    #[async_trait]
    impl Responder for PathResponder {
        async fn respond<F, Fut>(
            &self,
            parts: Parts,
            body: Body,
            client_ip: IpAddr,
            next: F,
        ) -> Result<Response<Body>, Infallible>
        where
            Fut: Future<Output = Result<Response<Body>, Infallible>> + Send,
            F: FnOnce(Parts, Body, IpAddr) -> Fut + Send,
        {
            if parts.uri.path() != self.0 {
                return next(parts, body, client_ip).await;
            }

            Ok(Response::new(Body::from(self.0)))
        }
    }

    fn parts(path: &str) -> Parts {
        let (parts, _) = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn pass_request_along_the_chain() {
        let first = PathResponder("/first");
        let second = PathResponder("/second");
        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);

        let response = responder_chain!(parts("/second"), Body::empty(), ip, { first, second })
            .await
            .unwrap();

        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&bytes[..], b"/second");
    }

    #[tokio::test]
    async fn answer_unhandled_with_not_found() {
        let first = PathResponder("/first");
        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);

        let response = responder_chain!(parts("/other"), Body::empty(), ip, { first })
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    mod without_trait_in_scope {
        use super::{parts, PathResponder};
        use hyper::Body;
        use std::net::{IpAddr, Ipv4Addr};

        #[tokio::test]
        async fn chain_responders() {
            let first = PathResponder("/first");
            let second = PathResponder("/second");
            let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);

            let response = crate::responder_chain!(parts("/first"), Body::empty(), ip, { first, second })
                .await
                .unwrap();

            let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
            assert_eq!(&bytes[..], b"/first");
        }
    }
}
