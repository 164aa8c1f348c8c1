//! Scripted gateway for tests.
//!
//! Replays queued replies in order and records every request, so tests can
//! assert which prompts were sent and how many calls a pipeline made.
//! An exhausted script answers with a gateway error.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{CompletionGateway, CompletionRequest, GatewayError};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail { status: u16, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedGateway {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful raw payload.
    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Text(text.into()));
        self
    }

    /// Queues a provider failure.
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Fail {
            status: 503,
            message: message.into(),
        });
        self
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail { status, message }) => Err(GatewayError::Api { status, message }),
            None => Err(GatewayError::Api {
                status: 500,
                message: "script exhausted".to_string(),
            }),
        }
    }
}
