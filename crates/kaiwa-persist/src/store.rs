use async_trait::async_trait;
use kaiwa_llm::{ChatTurn, Role};

use crate::error::Result;
use crate::models::{Message, Thread};
use crate::mongo::gateway::MongoGateway;
use crate::mongo::repositories::{MessageRepository, ThreadRepository};

/// Facade over both repositories, taken as a trait object by the API and
/// the orchestrator so tests can swap in an in-memory implementation.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn create_thread(&self, title: Option<String>) -> Result<Thread>;
    async fn list_threads(&self) -> Result<Vec<Thread>>;
    async fn get_thread(&self, thread_id: &str) -> Result<Option<Thread>>;
    async fn rename_thread(&self, thread_id: &str, title: &str) -> Result<Option<Thread>>;
    async fn touch_thread(&self, thread_id: &str) -> Result<Option<Thread>>;
    async fn delete_thread(&self, thread_id: &str) -> Result<bool>;

    async fn insert_message(&self, thread_id: &str, role: Role, content: &str)
        -> Result<Message>;
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>>;
    async fn history(&self, thread_id: &str) -> Result<Vec<ChatTurn>>;
    async fn delete_messages_by_thread(&self, thread_id: &str) -> Result<u64>;
    async fn delete_message(&self, message_id: &str) -> Result<bool>;
}

/// MongoDB-backed [`ConversationStore`].
pub struct MongoStore {
    threads: ThreadRepository,
    messages: MessageRepository,
}

impl MongoStore {
    pub fn new(gateway: &MongoGateway) -> Self {
        Self {
            threads: ThreadRepository::new(gateway),
            messages: MessageRepository::new(gateway),
        }
    }
}

#[async_trait]
impl ConversationStore for MongoStore {
    async fn create_thread(&self, title: Option<String>) -> Result<Thread> {
        self.threads.create(title).await
    }

    async fn list_threads(&self) -> Result<Vec<Thread>> {
        self.threads.list().await
    }

    async fn get_thread(&self, thread_id: &str) -> Result<Option<Thread>> {
        self.threads.get(thread_id).await
    }

    async fn rename_thread(&self, thread_id: &str, title: &str) -> Result<Option<Thread>> {
        self.threads.update(thread_id, title).await
    }

    async fn touch_thread(&self, thread_id: &str) -> Result<Option<Thread>> {
        self.threads.touch(thread_id).await
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<bool> {
        self.threads.delete(thread_id).await
    }

    async fn insert_message(
        &self,
        thread_id: &str,
        role: Role,
        content: &str,
    ) -> Result<Message> {
        self.messages.create(thread_id, role, content).await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        self.messages.list_by_thread(thread_id).await
    }

    async fn history(&self, thread_id: &str) -> Result<Vec<ChatTurn>> {
        self.messages.history(thread_id).await
    }

    async fn delete_messages_by_thread(&self, thread_id: &str) -> Result<u64> {
        self.messages.delete_by_thread(thread_id).await
    }

    async fn delete_message(&self, message_id: &str) -> Result<bool> {
        self.messages.delete(message_id).await
    }
}
