//! Mock generative service for testing.

use articulate_core::{Citation, ServiceRequest, ServiceResponse};
use articulate_error::{ServiceError, ServiceErrorKind};
use articulate_interface::GenerativeService;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(ServiceErrorKind),
    /// Wait before answering with the given text
    Delayed { delay: Duration, text: String },
    /// Return a sequence of responses, one per call
    Sequence(Vec<MockResponse>),
}

/// A single mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    WithCitations(String, Vec<Citation>),
    Error(ServiceErrorKind),
}

/// Scripted service that records every request it receives.
pub struct MockService {
    behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<ServiceRequest>>>,
}

impl MockService {
    pub fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always succeed with `text`.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Success(text.into()))
    }

    /// Always fail with `error`.
    pub fn new_error(error: ServiceErrorKind) -> Self {
        Self::new_with_behavior(MockBehavior::Error(error))
    }

    /// Answer with `text` after `delay`.
    pub fn new_delayed(delay: Duration, text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Delayed {
            delay,
            text: text.into(),
        })
    }

    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(MockBehavior::Sequence(responses))
    }

    /// Number of times generate() was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every request received, in call order.
    pub fn requests(&self) -> Vec<ServiceRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self, current: usize) -> Result<ServiceResponse, ServiceError> {
        match &self.behavior {
            MockBehavior::Success(text) | MockBehavior::Delayed { text, .. } => {
                Ok(ServiceResponse::from_text(text.clone()))
            }
            MockBehavior::Error(kind) => Err(ServiceError::new(kind.clone())),
            MockBehavior::Sequence(responses) => match responses.get(current) {
                Some(MockResponse::Success(text)) => Ok(ServiceResponse::from_text(text.clone())),
                Some(MockResponse::WithCitations(text, citations)) => Ok(ServiceResponse {
                    text: text.clone(),
                    citations: citations.clone(),
                }),
                Some(MockResponse::Error(kind)) => Err(ServiceError::new(kind.clone())),
                None => Err(ServiceError::new(ServiceErrorKind::Upstream {
                    status_code: 500,
                    message: format!(
                        "Mock sequence exhausted (call {} beyond {} responses)",
                        current + 1,
                        responses.len()
                    ),
                })),
            },
        }
    }
}

#[async_trait]
impl GenerativeService for MockService {
    async fn generate(&self, req: &ServiceRequest) -> Result<ServiceResponse, ServiceError> {
        let current = {
            let mut count = self.call_count.lock().unwrap();
            let current = *count;
            *count += 1;
            current
        };
        self.requests.lock().unwrap().push(req.clone());

        if let MockBehavior::Delayed { delay, .. } = &self.behavior {
            tokio::time::sleep(*delay).await;
        }
        self.next_response(current)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
