use domain::DomainError;
use hyper::http::{Response, StatusCode};
use hyper::Body;
use library::communication::request::RequestError;
use library::communication::ErrorTrace;
use library::http::{ErrorBody, JsonBodyError};
use thiserror::Error;
use tracing::{debug, warn};

/// Everything that may go wrong while handling an HTTP request
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("{0:?} is not a valid object id")]
    InvalidId(String),
    #[error("required query parameter {0} is missing")]
    MissingParameter(&'static str),
    #[error(transparent)]
    MalformedBody(#[from] JsonBodyError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Domain(error) => match error {
                DomainError::UserNotFound { .. } | DomainError::BookNotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                DomainError::Conflict { .. } => StatusCode::CONFLICT,
                DomainError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
                DomainError::RemoteOperationFailed { .. } => StatusCode::BAD_GATEWAY,
            },
            GatewayError::Request(error) => match error {
                RequestError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                RequestError::TransportUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                RequestError::Decode { .. } => StatusCode::BAD_GATEWAY,
                RequestError::Encode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            GatewayError::MalformedBody(JsonBodyError::TooLarge { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            GatewayError::InvalidId(_)
            | GatewayError::MissingParameter(_)
            | GatewayError::MalformedBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Machine readable identifier of the error category
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Domain(error) => match error {
                DomainError::UserNotFound { .. } => "UserNotFound",
                DomainError::BookNotFound { .. } => "BookNotFound",
                DomainError::Conflict { .. } => "Conflict",
                DomainError::ValidationFailed { .. } => "ValidationFailed",
                DomainError::RemoteOperationFailed { .. } => "RemoteOperationFailed",
            },
            GatewayError::Request(error) => match error {
                RequestError::Timeout { .. } => "Timeout",
                RequestError::TransportUnavailable(_) => "TransportUnavailable",
                RequestError::Decode { .. } => "DecodeError",
                RequestError::Encode { .. } => "EncodeError",
            },
            GatewayError::InvalidId(_) => "InvalidId",
            GatewayError::MissingParameter(_) => "MissingParameter",
            GatewayError::MalformedBody(JsonBodyError::TooLarge { .. }) => "PayloadTooLarge",
            GatewayError::MalformedBody(_) => "MalformedBody",
        }
    }

    pub fn into_response(self) -> Response<Body> {
        let status = self.status();
        let trace = ErrorTrace::new(&self);

        if status.is_server_error() {
            warn!(%status, error = %trace, "Request failed");
        } else {
            debug!(%status, error = %trace, "Request rejected");
        }

        ErrorBody::new(self.code(), trace.into_causes()).into_response(status)
    }
}
