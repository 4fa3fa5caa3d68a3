use super::super::dto::{BookExternalRequest, ChangeAmountExternalRequest};
use super::super::error::GatewayError;
use super::super::mapper::book::*;
use super::validated_id;
use async_trait::async_trait;
use futures::Future;
use hyper::http::{request::Parts, Method, Response, StatusCode};
use hyper::Body;
use library::communication::request::Requestor;
use library::http::{empty_response, json_response, read_json, MatchableString, Responder};
use std::convert::Infallible;
use std::net::IpAddr;

const BOOK_PREFIX: &str = "/book";
const AMOUNT_SEGMENT: &str = "amount";

enum BookRoute {
    Create,
    Find(String),
    Update(String),
    ChangeAmount(String),
    Delete(String),
}

pub struct BookResponder<R> {
    requestor: R,
}

impl<R> BookResponder<R>
where
    R: Requestor + Send + Sync,
{
    pub fn new(requestor: R) -> Self {
        Self { requestor }
    }

    fn match_request(parts: &Parts) -> Option<BookRoute> {
        let mut path = MatchableString::new(parts.uri.path());
        path.consume_prefix(BOOK_PREFIX)?;

        if path.consume_end().is_some() {
            return match parts.method {
                Method::POST => Some(BookRoute::Create),
                _ => None,
            };
        }

        let id = path.consume_segment()?.to_owned();

        if path.consume_end().is_some() {
            return match parts.method {
                Method::GET => Some(BookRoute::Find(id)),
                Method::PUT => Some(BookRoute::Update(id)),
                Method::DELETE => Some(BookRoute::Delete(id)),
                _ => None,
            };
        }

        let is_amount = path.consume_segment()? == AMOUNT_SEGMENT;

        if is_amount && path.consume_end().is_some() && parts.method == Method::PATCH {
            Some(BookRoute::ChangeAmount(id))
        } else {
            None
        }
    }

    async fn handle(&self, route: BookRoute, body: Body) -> Result<Response<Body>, GatewayError> {
        match route {
            BookRoute::Create => {
                let external: BookExternalRequest = read_json(body).await?;
                let reply = self
                    .requestor
                    .request(&to_create_book_request(external))
                    .await?;

                Ok(json_response(
                    StatusCode::CREATED,
                    &book_to_external(reply, None)?,
                ))
            }
            BookRoute::Find(id) => {
                let id = validated_id(&id)?;
                let reply = self
                    .requestor
                    .request(&to_find_book_by_id_request(id))
                    .await?;

                Ok(json_response(StatusCode::OK, &book_to_external(reply, Some(id))?))
            }
            BookRoute::Update(id) => {
                let id = validated_id(&id)?;
                let external: BookExternalRequest = read_json(body).await?;
                let reply = self
                    .requestor
                    .request(&to_update_book_request(id, external))
                    .await?;

                Ok(json_response(StatusCode::OK, &book_to_external(reply, Some(id))?))
            }
            BookRoute::ChangeAmount(id) => {
                let id = validated_id(&id)?;
                let external: ChangeAmountExternalRequest = read_json(body).await?;
                let reply = self
                    .requestor
                    .request(&to_change_book_amount_request(id, external.delta))
                    .await?;

                Ok(json_response(StatusCode::OK, &amount_to_external(reply, id)?))
            }
            BookRoute::Delete(id) => {
                let id = validated_id(&id)?;
                let reply = self
                    .requestor
                    .request(&to_delete_book_by_id_request(id))
                    .await?;

                book_ack_to_external(reply, id)?;
                Ok(empty_response(StatusCode::NO_CONTENT))
            }
        }
    }
}

#[async_trait]
impl<R> Responder for BookResponder<R>
where
    R: Requestor + Send + Sync,
{
    #[inline]
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
        let route = match Self::match_request(&parts) {
            Some(route) => route,
            None => return next(parts, body, client_ip).await,
        };

        match self.handle(route, body).await {
            Ok(response) => Ok(response),
            Err(error) => Ok(error.into_response()),
        }
    }
}

#[cfg(test)]
mod does {
    use super::*;
    use domain::book::{
        Book, BookContent, ChangeBookAmountRequest, CreateBookRequest, DeleteBookByIdRequest,
        UpdateBookRequest,
    };
    use domain::{EntityKind, ErrorDetail, FailureKind, Reply};
    use hyper::http::Request;
    use library::communication::implementation::mock::MockRequestor;
    use library::communication::request::RequestError;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::net::Ipv4Addr;
    use std::sync::Arc;

    const BOOK_ID: &str = "64b7f3c2a1e4d5f6a7b8c9d1";

    fn dune_content() -> BookContent {
        BookContent {
            title: "Dune".into(),
            description: None,
            year_of_publishing: 1965,
            price: 9.5,
            amount_available: 2,
        }
    }

    fn dune_json() -> Body {
        Body::from(
            r#"{"title":"Dune","yearOfPublishing":1965,"price":9.5,"amountAvailable":2}"#,
        )
    }

    async fn call(
        requestor: &Arc<MockRequestor>,
        method: Method,
        uri: &str,
        body: Body,
    ) -> Response<Body> {
        let responder = BookResponder::new(requestor.clone());
        let (parts, body) = Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap()
            .into_parts();

        responder
            .respond(parts, body, IpAddr::V4(Ipv4Addr::LOCALHOST), |_, _, _| async {
                Ok(empty_response(StatusCode::IM_A_TEAPOT))
            })
            .await
            .unwrap()
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_book() {
        let requestor = Arc::new(MockRequestor::default());
        requestor.expect_and_respond(
            &CreateBookRequest {
                content: dune_content(),
            },
            Reply::success(dune_content().into_book(BOOK_ID.into())),
        );

        let response = call(&requestor, Method::POST, "/book", dune_json()).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            json_body(response).await,
            json!({
                "id": BOOK_ID,
                "title": "Dune",
                "description": null,
                "yearOfPublishing": 1965,
                "price": 9.5,
                "amountAvailable": 2
            })
        );
    }

    #[tokio::test]
    async fn update_missing_book() {
        let requestor = Arc::new(MockRequestor::default());
        requestor.expect_and_respond(
            &UpdateBookRequest {
                id: BOOK_ID.into(),
                content: dune_content(),
            },
            Reply::<Book>::failure(ErrorDetail::not_found(EntityKind::Book, BOOK_ID)),
        );

        let uri = format!("/book/{}", BOOK_ID);
        let response = call(&requestor, Method::PUT, &uri, dune_json()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "BookNotFound");
    }

    #[tokio::test]
    async fn change_amount() {
        let requestor = Arc::new(MockRequestor::default());
        requestor.expect_and_respond(
            &ChangeBookAmountRequest {
                id: BOOK_ID.into(),
                delta: -1,
            },
            Reply::success(1),
        );

        let uri = format!("/book/{}/amount", BOOK_ID);
        let response = call(&requestor, Method::PATCH, &uri, Body::from(r#"{"delta":-1}"#)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "amount": 1 }));
    }

    #[tokio::test]
    async fn reject_excessive_withdrawal() {
        let requestor = Arc::new(MockRequestor::default());
        requestor.expect_and_respond(
            &ChangeBookAmountRequest {
                id: BOOK_ID.into(),
                delta: -5,
            },
            Reply::failure(ErrorDetail::new(
                FailureKind::ValidationFailed,
                "Can't withdraw 5 book(s), when amount is 2",
            )),
        );

        let uri = format!("/book/{}/amount", BOOK_ID);
        let response = call(&requestor, Method::PATCH, &uri, Body::from(r#"{"delta":-5}"#)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"], "ValidationFailed");
        assert_eq!(
            body["message"],
            "validation failed: Can't withdraw 5 book(s), when amount is 2"
        );
    }

    #[tokio::test]
    async fn delete_book() {
        let requestor = Arc::new(MockRequestor::default());
        requestor.expect_and_respond(
            &DeleteBookByIdRequest { id: BOOK_ID.into() },
            Reply::success(()),
        );

        let uri = format!("/book/{}", BOOK_ID);
        let response = call(&requestor, Method::DELETE, &uri, Body::empty()).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn answer_unavailable_transport_with_service_unavailable() {
        let requestor = Arc::new(MockRequestor::default());
        requestor.expect_and_fail(
            &DeleteBookByIdRequest { id: BOOK_ID.into() },
            || RequestError::TransportUnavailable("not connected".into()),
        );

        let uri = format!("/book/{}", BOOK_ID);
        let response = call(&requestor, Method::DELETE, &uri, Body::empty()).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn reject_invalid_id() {
        let requestor = Arc::new(MockRequestor::default());

        let response = call(&requestor, Method::GET, "/book/not-an-id", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "InvalidId");
    }
}
