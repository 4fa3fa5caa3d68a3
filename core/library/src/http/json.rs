use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::http::{Response, StatusCode};
use hyper::body::HttpBody;
use hyper::{body, Body};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

const APPLICATION_JSON: &str = "application/json";

/// Largest request body [`read_json`] accepts, in bytes
pub const MAX_JSON_BODY_SIZE: usize = 64 * 1024;

/// Error that occurs while reading a JSON request body
#[derive(Debug, Error)]
pub enum JsonBodyError {
    /// Body could not be received
    #[error("request body unreadable")]
    Unreadable(#[source] hyper::Error),
    /// Body is no valid JSON or does not match the expected shape
    #[error("request body is malformed")]
    Malformed(#[source] serde_json::Error),
    /// Body exceeds the accepted size
    #[error("request body exceeds {limit} bytes")]
    TooLarge {
        /// Accepted size in bytes
        limit: usize,
    },
}

/// Receives the whole body and parses it as JSON, rejecting bodies larger than [`MAX_JSON_BODY_SIZE`]
pub async fn read_json<T: DeserializeOwned>(body: Body) -> Result<T, JsonBodyError> {
    read_json_with_limit(body, MAX_JSON_BODY_SIZE).await
}

/// Receives at most `limit` bytes of body and parses them as JSON
///
/// The announced length is checked before anything is received, the actual length while receiving.
pub async fn read_json_with_limit<T: DeserializeOwned>(
    mut body: Body,
    limit: usize,
) -> Result<T, JsonBodyError> {
    if body.size_hint().lower() > limit as u64 {
        return Err(JsonBodyError::TooLarge { limit });
    }

    let mut bytes = Vec::new();

    while let Some(chunk) = body.data().await {
        let chunk = chunk.map_err(JsonBodyError::Unreadable)?;

        if bytes.len() + chunk.len() > limit {
            return Err(JsonBodyError::TooLarge { limit });
        }

        bytes.extend_from_slice(&chunk);
    }

    serde_json::from_slice(&bytes).map_err(JsonBodyError::Malformed)
}

/// Serializes the value into a response with the given status
///
/// Falls back to an empty `500 Internal Server Error` if the value can not be serialized.
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response<Body> {
    match serde_json::to_vec(value) {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
            response
        }
        Err(e) => {
            error!(error = %e, "Unable to serialize response body");
            empty_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Creates a response without a body
pub fn empty_response(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

/// Uniform body of error responses
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ErrorBody {
    /// Machine readable category of the error
    pub error: String,
    /// Human readable top-level message
    pub message: String,
    /// Messages of the underlying errors, outermost first
    pub causes: Vec<String>,
}

impl ErrorBody {
    /// Creates a new body from a category and a chain of messages
    ///
    /// The first message of the chain becomes the top-level message, the remainder are listed as causes.
    pub fn new(error: impl Into<String>, mut messages: Vec<String>) -> Self {
        let message = if messages.is_empty() {
            String::new()
        } else {
            messages.remove(0)
        };

        Self {
            error: error.into(),
            message,
            causes: messages,
        }
    }

    /// Converts the body into a response carrying the given status
    pub fn into_response(self, status: StatusCode) -> Response<Body> {
        json_response(status, &self)
    }
}

#[cfg(test)]
mod does {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Delta {
        delta: i32,
    }

    #[tokio::test]
    async fn parse_json_body() {
        let parsed: Delta = read_json(Body::from(r#"{"delta":-3}"#)).await.unwrap();
        assert_eq!(parsed, Delta { delta: -3 });
    }

    #[tokio::test]
    async fn reject_malformed_body() {
        let result = read_json::<Delta>(Body::from(r#"{"delta":"many"}"#)).await;
        assert!(matches!(result, Err(JsonBodyError::Malformed(_))));
    }

    #[tokio::test]
    async fn refuse_oversized_body() {
        let announced = read_json_with_limit::<Delta>(Body::from(r#"{"delta":-3}"#), 4).await;

        let (mut sender, streamed) = Body::channel();
        tokio::spawn(async move {
            for chunk in [r#"{"delta":"#, "12345}"] {
                if sender.send_data(chunk.into()).await.is_err() {
                    break;
                }
            }
        });
        let streamed = read_json_with_limit::<Delta>(streamed, 12).await;

        assert!(matches!(announced, Err(JsonBodyError::TooLarge { limit: 4 })));
        assert!(matches!(streamed, Err(JsonBodyError::TooLarge { limit: 12 })));
    }

    #[tokio::test]
    async fn accept_body_at_the_limit() {
        let body = r#"{"delta":1}"#;
        let parsed: Delta = read_json_with_limit(Body::from(body), body.len()).await.unwrap();

        assert_eq!(parsed, Delta { delta: 1 });
    }

    #[tokio::test]
    async fn serialize_with_content_type() {
        let response = json_response(StatusCode::CREATED, &vec![1, 2, 3]);

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[CONTENT_TYPE], APPLICATION_JSON);

        let bytes = body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&bytes[..], b"[1,2,3]");
    }

    #[test]
    fn split_message_chain() {
        let body = ErrorBody::new(
            "Timeout",
            vec!["request failed".into(), "no reply within 5s".into()],
        );

        assert_eq!(body.message, "request failed");
        assert_eq!(body.causes, vec!["no reply within 5s".to_string()]);
    }

    #[test]
    fn tolerate_empty_chain() {
        let body = ErrorBody::new("Internal", Vec::new());

        assert_eq!(body.message, "");
        assert!(body.causes.is_empty());
    }
}
