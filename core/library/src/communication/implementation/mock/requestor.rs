use crate::communication::request::{Request, RequestError, Requestor};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

enum ExpectedOutcome {
    Respond(Value),
    Fail(Box<dyn Fn() -> RequestError + Send + Sync>),
}

struct ExpectedRequest {
    subject: &'static str,
    serialized: Value,
    outcome: ExpectedOutcome,
}

/// [`Requestor`] which verifies requests against a queue of expectations and answers with canned outcomes
///
/// Requests have to arrive in the order they have been expected in.
#[derive(Default)]
pub struct MockRequestor {
    remaining: AtomicUsize,
    expected: Mutex<VecDeque<ExpectedRequest>>,
}

impl MockRequestor {
    /// Expects the given request next and answers it with the response
    pub fn expect_and_respond<R>(&self, request: &R, response: R::Response) -> &Self
    where
        R: Request,
    {
        let response = serde_json::to_value(response).unwrap();
        self.push_expectation(request, ExpectedOutcome::Respond(response))
    }

    /// Expects the given request next and fails it with the error produced by the closure
    pub fn expect_and_fail<R, F>(&self, request: &R, error: F) -> &Self
    where
        R: Request,
        F: Fn() -> RequestError + Send + Sync + 'static,
    {
        self.push_expectation(request, ExpectedOutcome::Fail(Box::new(error)))
    }

    fn push_expectation<R: Request>(&self, request: &R, outcome: ExpectedOutcome) -> &Self {
        let expectation = ExpectedRequest {
            subject: R::subject(),
            serialized: serde_json::to_value(request).unwrap(),
            outcome,
        };

        self.expected.lock().unwrap().push_back(expectation);
        self.remaining.fetch_add(1, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl Requestor for Arc<MockRequestor> {
    async fn request<R>(&self, request: &R) -> Result<R::Response, RequestError>
    where
        R: Request + Send + Sync,
        R::Response: Send,
    {
        let expected = self.expected.lock().unwrap().pop_front();

        let expected = match expected {
            Some(expected) => expected,
            None => panic!("Received unexpected request on {}: {:?}", R::subject(), request),
        };

        self.remaining.fetch_sub(1, Ordering::SeqCst);

        assert_eq!(
            expected.subject,
            R::subject(),
            "Request was sent to a different subject than expected"
        );

        let expected_request: R = serde_json::from_value(expected.serialized)
            .expect("Failed to deserialize expected request");

        assert_eq!(expected_request, *request);

        match expected.outcome {
            ExpectedOutcome::Respond(response) => {
                Ok(serde_json::from_value(response).expect("Failed to deserialize response"))
            }
            ExpectedOutcome::Fail(error) => Err(error()),
        }
    }
}

impl Drop for MockRequestor {
    fn drop(&mut self) {
        let remaining = self.remaining.load(Ordering::SeqCst);

        if remaining > 0 && !std::thread::panicking() {
            panic!(
                "MockRequestor was dropped with {} expected requests remaining",
                remaining
            );
        }
    }
}

#[cfg(test)]
mod does {
    use super::*;
    use crate::communication::Subject;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
    struct MockResponse(usize);

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct MockRequest(usize);

    impl Request for MockRequest {
        type Response = MockResponse;

        fn subject() -> Subject {
            "mock.request"
        }
    }

    #[tokio::test]
    async fn fulfill_expectations() {
        let request = MockRequest(42);
        let response = MockResponse(42);
        let requestor = Arc::new(MockRequestor::default());

        requestor.expect_and_respond(&request, response);

        let received = requestor.request(&request).await.unwrap();

        assert_eq!(response, received);
    }

    #[tokio::test]
    async fn fail_as_instructed() {
        let request = MockRequest(42);
        let requestor = Arc::new(MockRequestor::default());

        requestor.expect_and_fail(&request, || RequestError::Timeout {
            subject: "mock.request".into(),
            timeout: Duration::from_secs(1),
        });

        let result = requestor.request(&request).await;

        assert!(matches!(result, Err(RequestError::Timeout { .. })));
    }

    #[tokio::test]
    #[should_panic]
    async fn fail_on_different_content() {
        let requestor = Arc::new(MockRequestor::default());
        requestor.expect_and_respond(&MockRequest(42), MockResponse(42));

        requestor.request(&MockRequest(1337)).await.unwrap();
    }

    #[tokio::test]
    #[should_panic]
    async fn fail_on_unexpected() {
        let requestor = Arc::new(MockRequestor::default());

        requestor.request(&MockRequest(42)).await.unwrap();
    }

    #[test]
    #[should_panic]
    fn fail_on_missing() {
        MockRequestor::default().expect_and_respond(&MockRequest(42), MockResponse(42));
    }
}
