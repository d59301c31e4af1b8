use crate::error::Result;
use crate::types::ChatTurn;
use async_trait::async_trait;

/// Trait for turning an ordered conversation history into a text reply.
///
/// The orchestrator holds this as a trait object so tests can substitute a
/// scripted generator for the real Gemini client.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply from the full ordered history.
    async fn generate(&self, history: &[ChatTurn]) -> Result<String>;

    /// Single-turn convenience: one user prompt, no prior history.
    async fn generate_simple(&self, prompt: &str) -> Result<String> {
        self.generate(&[ChatTurn::user(prompt)]).await
    }
}
