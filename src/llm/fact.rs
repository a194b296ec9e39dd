use rand::Rng;
use std::sync::Arc;
use tracing::warn;

use super::*;

pub const FACT_SYSTEM_PROMPT: &str = "You are a horror movie expert. Provide ONE interesting, \
lesser-known fact about the specified movie. Keep it to 1-2 sentences maximum.";

pub const FACT_UNAVAILABLE: &str =
    "The Oracle knows many secrets about this film, but cannot reveal them right now...";
pub const FACT_FAILED: &str =
    "The Oracle sees dark secrets about this film, but they are shrouded in mystery...";

/// One trivia sentence about a movie. Never fails: problems with the model
/// turn into an in-character fallback line.
pub struct FactGenerator {
    model: Option<Arc<dyn ChatModel>>,
}

impl FactGenerator {
    pub fn new(model: Option<Arc<dyn ChatModel>>) -> Self {
        Self { model }
    }

    pub async fn interesting_fact(&self, title: &str) -> String {
        let Some(model) = &self.model else {
            return FACT_UNAVAILABLE.to_string();
        };

        // The seed only nudges the model away from repeating itself.
        let seed: u32 = rand::thread_rng().gen_range(1..=1000);
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(FACT_SYSTEM_PROMPT),
                ChatMessage::user(fact_prompt(title, seed)),
            ],
            max_tokens: 100,
            temperature: 0.8,
        };

        match model.complete(request).await {
            Ok(fact) => fact.trim().to_string(),
            Err(e) => {
                warn!(title = %title, "Error generating interesting fact: {}", e);
                FACT_FAILED.to_string()
            }
        }
    }
}

fn fact_prompt(title: &str, seed: u32) -> String {
    format!(
        "Provide one interesting, lesser-known fact about the horror movie '{}'. \
         Keep it to 1-2 sentences maximum. Make it different from previous facts \
         you may have given. Seed: {}",
        title, seed
    )
}
