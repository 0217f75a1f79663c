//! Scripted chat backend for tests.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{ChatBackend, CompletionRequest};
use crate::error::{BackendError, ServiceResult};

#[derive(Clone)]
enum Reply {
    Text(String),
    Status(u16),
}

/// Answers every request with the same scripted reply and records requests.
pub struct FakeBackend {
    reply: Reply,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeBackend {
    /// Backend that answers every request with `text`
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Reply::Text(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Backend that fails every request with the given HTTP status
    pub fn failing(status: u16) -> Self {
        Self {
            reply: Reply::Status(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn complete(&self, request: CompletionRequest) -> ServiceResult<String> {
        self.requests.lock().unwrap().push(request);

        match self.reply.clone() {
            Reply::Text(text) => Ok(text),
            Reply::Status(status) => Err(BackendError::Status {
                status,
                body: "scripted failure".to_string(),
            }
            .into()),
        }
    }

    fn is_configured(&self) -> bool {
        true
    }
}
