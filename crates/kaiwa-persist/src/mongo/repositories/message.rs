use chrono::Utc;
use futures::TryStreamExt;
use kaiwa_llm::{ChatTurn, Role};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;

use crate::error::{PersistError, Result};
use crate::models::Message;
use crate::mongo::gateway::MongoGateway;
use crate::mongo::models::MongoMessage;

const MESSAGES_COLLECTION: &str = "messages";

/// CRUD over messages, always scoped to an owning thread.
#[derive(Clone)]
pub struct MessageRepository {
    collection: Collection<MongoMessage>,
}

impl MessageRepository {
    pub fn new(gateway: &MongoGateway) -> Self {
        Self {
            collection: gateway.collection(MESSAGES_COLLECTION),
        }
    }

    /// Insert one message, stamping `created_at`. The thread id must be a
    /// valid ObjectId: callers resolve the thread before writing into it.
    pub async fn create(&self, thread_id: &str, role: Role, content: &str) -> Result<Message> {
        let thread_oid = ObjectId::parse_str(thread_id)
            .map_err(|_| PersistError::InvalidObjectId(thread_id.to_string()))?;

        let message = MongoMessage {
            id: ObjectId::new(),
            thread_id: thread_oid,
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        };

        self.collection.insert_one(&message).await?;
        Ok(message.into())
    }

    /// All messages of a thread in creation order; malformed or unknown
    /// thread ids read as an empty sequence.
    pub async fn list_by_thread(&self, thread_id: &str) -> Result<Vec<Message>> {
        let Ok(thread_oid) = ObjectId::parse_str(thread_id) else {
            return Ok(Vec::new());
        };

        let messages: Vec<MongoMessage> = self
            .collection
            .find(doc! { "thread_id": thread_oid })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(messages.into_iter().map(Into::into).collect())
    }

    /// The thread's history projected to `{role, content}` turns — the
    /// exact shape the generation client consumes.
    pub async fn history(&self, thread_id: &str) -> Result<Vec<ChatTurn>> {
        let messages = self.list_by_thread(thread_id).await?;

        Ok(messages
            .into_iter()
            .map(|m| ChatTurn {
                role: m.role,
                content: m.content,
            })
            .collect())
    }

    /// Remove every message owned by a thread (cascade on thread delete);
    /// returns the count removed.
    pub async fn delete_by_thread(&self, thread_id: &str) -> Result<u64> {
        let Ok(thread_oid) = ObjectId::parse_str(thread_id) else {
            return Ok(0);
        };

        let result = self
            .collection
            .delete_many(doc! { "thread_id": thread_oid })
            .await?;
        Ok(result.deleted_count)
    }

    /// Remove a single message by id; true iff a document existed.
    pub async fn delete(&self, message_id: &str) -> Result<bool> {
        let Ok(object_id) = ObjectId::parse_str(message_id) else {
            return Ok(false);
        };

        let result = self.collection.delete_one(doc! { "_id": object_id }).await?;
        Ok(result.deleted_count > 0)
    }
}
