use chrono::{DateTime, Utc};
use kaiwa_llm::Role;
use serde::{Deserialize, Serialize};

/// One conversation turn as served over the API.
///
/// `created_at` is the sole ordering key within a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub thread_id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
