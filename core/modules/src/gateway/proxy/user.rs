use super::super::dto::{CreateUserExternalRequest, UpdateUserExternalRequest};
use super::super::error::GatewayError;
use super::super::mapper::user::*;
use super::{validated_id, validated_ids};
use async_trait::async_trait;
use futures::Future;
use hyper::http::{request::Parts, Method, Response, StatusCode};
use hyper::Body;
use library::communication::request::Requestor;
use library::http::{
    empty_response, json_response, query_parameter, read_json, MatchableString, Responder,
};
use std::convert::Infallible;
use std::net::IpAddr;

const USER_PREFIX: &str = "/user";
const WISHLIST_SEGMENT: &str = "wishlist";
const BOOK_ID_PARAMETER: &str = "bookId";

enum UserRoute {
    Create,
    Find(String),
    Update(String),
    Delete(String),
    AddBookToWishList(String),
}

pub struct UserResponder<R> {
    requestor: R,
}

impl<R> UserResponder<R>
where
    R: Requestor + Send + Sync,
{
    pub fn new(requestor: R) -> Self {
        Self { requestor }
    }

    fn match_request(parts: &Parts) -> Option<UserRoute> {
        let mut path = MatchableString::new(parts.uri.path());
        path.consume_prefix(USER_PREFIX)?;

        if path.consume_end().is_some() {
            return match parts.method {
                Method::POST => Some(UserRoute::Create),
                _ => None,
            };
        }

        let id = path.consume_segment()?.to_owned();

        if path.consume_end().is_some() {
            return match parts.method {
                Method::GET => Some(UserRoute::Find(id)),
                Method::PUT => Some(UserRoute::Update(id)),
                Method::DELETE => Some(UserRoute::Delete(id)),
                _ => None,
            };
        }

        let is_wishlist = path.consume_segment()? == WISHLIST_SEGMENT;

        if is_wishlist && path.consume_end().is_some() && parts.method == Method::PUT {
            Some(UserRoute::AddBookToWishList(id))
        } else {
            None
        }
    }

    async fn handle(
        &self,
        route: UserRoute,
        parts: &Parts,
        body: Body,
    ) -> Result<Response<Body>, GatewayError> {
        match route {
            UserRoute::Create => {
                let external: CreateUserExternalRequest = read_json(body).await?;
                validated_ids(&external.book_wish_list)?;
                let reply = self
                    .requestor
                    .request(&to_create_user_request(external))
                    .await?;

                Ok(json_response(
                    StatusCode::CREATED,
                    &user_to_external(reply, None)?,
                ))
            }
            UserRoute::Find(id) => {
                let id = validated_id(&id)?;
                let reply = self
                    .requestor
                    .request(&to_find_user_by_id_request(id))
                    .await?;

                Ok(json_response(StatusCode::OK, &user_to_external(reply, Some(id))?))
            }
            UserRoute::Update(id) => {
                let id = validated_id(&id)?;
                let external: UpdateUserExternalRequest = read_json(body).await?;
                validated_ids(&external.book_wish_list)?;
                let reply = self
                    .requestor
                    .request(&to_update_user_request(id, external))
                    .await?;

                Ok(json_response(StatusCode::OK, &user_to_external(reply, Some(id))?))
            }
            UserRoute::Delete(id) => {
                let id = validated_id(&id)?;
                let reply = self
                    .requestor
                    .request(&to_delete_user_by_id_request(id))
                    .await?;

                user_ack_to_external(reply, id)?;
                Ok(empty_response(StatusCode::NO_CONTENT))
            }
            UserRoute::AddBookToWishList(id) => {
                let id = validated_id(&id)?;
                let book_id = query_parameter(parts.uri.query(), BOOK_ID_PARAMETER)
                    .ok_or(GatewayError::MissingParameter(BOOK_ID_PARAMETER))?;
                let book_id = validated_id(book_id)?;

                let reply = self
                    .requestor
                    .request(&to_add_book_to_wish_list_request(id, book_id))
                    .await?;

                user_ack_to_external(reply, id)?;
                Ok(empty_response(StatusCode::NO_CONTENT))
            }
        }
    }
}

#[async_trait]
impl<R> Responder for UserResponder<R>
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

        match self.handle(route, &parts, body).await {
            Ok(response) => Ok(response),
            Err(error) => Ok(error.into_response()),
        }
    }
}
