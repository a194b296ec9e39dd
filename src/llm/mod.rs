pub mod fact;
pub mod openai;
pub mod responder;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use fact::FactGenerator;
pub use openai::OpenAiClient;
pub use responder::GeneralResponder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A chat-completion language model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the text of the first completion choice.
    async fn complete(&self, request: ChatRequest) -> LlmResult<String>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Language model API key is not set")]
    MissingCredential,
    #[error("Language model request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Language model returned HTTP status {0}: {1}")]
    Status(u16, String),
    #[error("Language model returned no completion")]
    EmptyCompletion,
}

pub type LlmResult<T> = Result<T, LlmError>;
