use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to threads created without one ("new conversation").
pub const DEFAULT_THREAD_TITLE: &str = "新しい会話";

/// A conversation thread as served over the API.
///
/// The id is the storage ObjectId rendered as hex; timestamps serialize as
/// ISO-8601 via chrono's serde. `updated_at` moves every time a message is
/// appended or the title changes, so `updated_at >= created_at` always.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
