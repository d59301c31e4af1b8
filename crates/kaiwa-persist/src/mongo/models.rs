use chrono::{DateTime, Utc};
use kaiwa_llm::Role;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::{Message, Thread};

/// Storage-side thread document (uses ObjectId and native BSON datetimes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoThread {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Storage-side message document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMessage {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub thread_id: ObjectId,
    pub role: Role,
    pub content: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

// Conversions from storage documents to the API-facing models.

impl From<MongoThread> for Thread {
    fn from(thread: MongoThread) -> Self {
        Self {
            id: thread.id.to_hex(),
            title: thread.title,
            created_at: thread.created_at,
            updated_at: thread.updated_at,
        }
    }
}

impl From<MongoMessage> for Message {
    fn from(message: MongoMessage) -> Self {
        Self {
            id: message.id.to_hex(),
            thread_id: message.thread_id.to_hex(),
            role: message.role,
            content: message.content,
            created_at: message.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_conversion_renders_hex_id() {
        let oid = ObjectId::new();
        let now = Utc::now();
        let thread = MongoThread {
            id: oid,
            title: "テスト".to_string(),
            created_at: now,
            updated_at: now,
        };

        let public: Thread = thread.into();
        assert_eq!(public.id, oid.to_hex());
        assert_eq!(public.title, "テスト");
        assert_eq!(public.created_at, public.updated_at);
    }

    #[test]
    fn message_conversion_keeps_role_and_thread_link() {
        let id = ObjectId::new();
        let thread_id = ObjectId::new();
        let message = MongoMessage {
            id,
            thread_id,
            role: Role::Assistant,
            content: "hello".to_string(),
            created_at: Utc::now(),
        };

        let public: Message = message.into();
        assert_eq!(public.id, id.to_hex());
        assert_eq!(public.thread_id, thread_id.to_hex());
        assert_eq!(public.role, Role::Assistant);
    }
}
