use async_trait::async_trait;
use std::sync::Mutex;

use super::*;

/// Replies with a fixed text, or fails every call.
#[derive(Default)]
pub struct FakeChat {
    pub reply: Option<String>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl FakeChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for FakeChat {
    async fn complete(&self, request: ChatRequest) -> LlmResult<String> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Status(503, "model overloaded".to_string())),
        }
    }
}
