//! Structures for handling HTTP requests and building JSON responses

mod json;
mod matchable;
mod responder;

pub use json::{
    empty_response, json_response, read_json, read_json_with_limit, ErrorBody, JsonBodyError,
    MAX_JSON_BODY_SIZE,
};
pub use matchable::{query_parameter, MatchableString};
pub use responder::{
    make_responder_chain_service_fn, responder_chain, unhandled_response, Responder,
};
