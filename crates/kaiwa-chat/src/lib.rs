use std::sync::Arc;

use kaiwa_llm::{LlmError, Role, TextGenerator};
use kaiwa_persist::{ConversationStore, Message, PersistError};
use thiserror::Error;

/// The two messages an accepted send produces.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user_message: Message,
    pub assistant_message: Message,
}

/// Outcome of a rejected or failed send.
///
/// `Generation` is the partial-success case: the user's message was already
/// persisted when the generation call failed, and it rides along so callers
/// can show it. That policy is deliberate and must not be "fixed" into a
/// rollback.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("thread not found: {0}")]
    ThreadNotFound(String),

    #[error("message content cannot be empty")]
    EmptyContent,

    #[error("response generation failed: {cause}")]
    Generation {
        user_message: Box<Message>,
        #[source]
        cause: LlmError,
    },

    #[error(transparent)]
    Store(#[from] PersistError),
}

/// The only multi-step business logic in the system: validate, persist the
/// user turn, replay history through the generator, persist the reply,
/// bump thread recency.
pub struct ChatService {
    store: Arc<dyn ConversationStore>,
    generator: Arc<dyn TextGenerator>,
}

impl ChatService {
    pub fn new(store: Arc<dyn ConversationStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { store, generator }
    }

    /// Handle one "send message" request, strictly sequential.
    ///
    /// Nothing is written before the thread resolves and the content
    /// validates; the user message write is never rolled back afterwards.
    pub async fn send(&self, thread_id: &str, content: &str) -> Result<Exchange, SendError> {
        let thread = self
            .store
            .get_thread(thread_id)
            .await?
            .ok_or_else(|| SendError::ThreadNotFound(thread_id.to_string()))?;

        let content = content.trim();
        if content.is_empty() {
            return Err(SendError::EmptyContent);
        }

        let user_message = self
            .store
            .insert_message(&thread.id, Role::User, content)
            .await?;

        let history = self.store.history(&thread.id).await?;

        let reply = match self.generator.generate(&history).await {
            Ok(reply) => reply,
            Err(cause) => {
                tracing::error!(thread_id = %thread.id, error = %cause, "response generation failed");
                return Err(SendError::Generation {
                    user_message: Box::new(user_message),
                    cause,
                });
            }
        };

        let assistant_message = self
            .store
            .insert_message(&thread.id, Role::Assistant, &reply)
            .await?;

        self.store.touch_thread(&thread.id).await?;

        tracing::debug!(
            thread_id = %thread.id,
            history_turns = history.len(),
            "exchange completed"
        );

        Ok(Exchange {
            user_message,
            assistant_message,
        })
    }
}
