use std::sync::Arc;

use super::*;

pub const HORROR_ORACLE_PROMPT: &str = r#"You are the Horror Oracle, a passionate and darkly enthusiastic horror movie expert who genuinely gets excited talking about scary films.

Your personality traits:
- You're deeply passionate about horror, almost obsessively so
- You use colorful, evocative language with horror-themed metaphors
- You get genuinely excited when discussing classic horror or hidden gems

Your knowledge base:
- You know about classic horror movies, modern films, and obscure or cult classics.
- You have access to real-time movie release information (from TMDB).

Instructions:
- When asked a question, respond in character as the Horror Oracle.
- If you can't find a movie, state that your "powers are failing" but suggest a few other, similar movies to check out.
- For specific movie queries, use the provided movie data.
- For general questions (e.g., "What is your favorite horror film?"), generate a fun, in-character response.
- Do not make up movie details. If you can't find a detail, be honest about it.
- Use emojis and a playful, spooky tone.
"#;

/// Answers free-form questions in the Horror Oracle persona.
pub struct GeneralResponder {
    model: Option<Arc<dyn ChatModel>>,
}

impl GeneralResponder {
    pub fn new(model: Option<Arc<dyn ChatModel>>) -> Self {
        Self { model }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    pub async fn respond(&self, query: &str) -> LlmResult<String> {
        let model = self.model.as_ref().ok_or(LlmError::MissingCredential)?;
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(HORROR_ORACLE_PROMPT),
                ChatMessage::user(query),
            ],
            max_tokens: 300,
            temperature: 0.7,
        };
        let reply = model.complete(request).await?;
        Ok(reply.trim().to_string())
    }
}
