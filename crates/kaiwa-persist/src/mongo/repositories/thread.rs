use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::error::Result;
use crate::models::{Thread, DEFAULT_THREAD_TITLE};
use crate::mongo::gateway::MongoGateway;
use crate::mongo::models::MongoThread;

const THREADS_COLLECTION: &str = "threads";

/// CRUD over conversation threads.
///
/// Read, update and delete operations take ids as strings and absorb
/// malformed or unknown ids into `None` / `false`; only driver errors
/// propagate.
#[derive(Clone)]
pub struct ThreadRepository {
    collection: Collection<MongoThread>,
}

impl ThreadRepository {
    pub fn new(gateway: &MongoGateway) -> Self {
        Self {
            collection: gateway.collection(THREADS_COLLECTION),
        }
    }

    /// Insert a new thread. A missing or blank title falls back to the
    /// default placeholder; both timestamps are set to the same instant.
    pub async fn create(&self, title: Option<String>) -> Result<Thread> {
        let title = resolve_title(title);
        let now = Utc::now();
        let thread = MongoThread {
            id: ObjectId::new(),
            title,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&thread).await?;
        Ok(thread.into())
    }

    /// All threads, most recently updated first.
    pub async fn list(&self) -> Result<Vec<Thread>> {
        let threads: Vec<MongoThread> = self
            .collection
            .find(doc! {})
            .sort(doc! { "updated_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(threads.into_iter().map(Into::into).collect())
    }

    /// Look a thread up by id; malformed ids read as absent.
    pub async fn get(&self, thread_id: &str) -> Result<Option<Thread>> {
        let Ok(object_id) = ObjectId::parse_str(thread_id) else {
            return Ok(None);
        };

        let thread = self.collection.find_one(doc! { "_id": object_id }).await?;
        Ok(thread.map(Into::into))
    }

    /// Set a new title, refreshing `updated_at`. Returns the post-update
    /// document, or `None` for malformed/unknown ids.
    pub async fn update(&self, thread_id: &str, title: &str) -> Result<Option<Thread>> {
        let update = doc! {
            "$set": {
                "title": title,
                "updated_at": bson::DateTime::now(),
            }
        };
        self.find_and_apply(thread_id, update).await
    }

    /// Refresh `updated_at` without touching the title (used after a
    /// message append bumps thread recency).
    pub async fn touch(&self, thread_id: &str) -> Result<Option<Thread>> {
        let update = doc! { "$set": { "updated_at": bson::DateTime::now() } };
        self.find_and_apply(thread_id, update).await
    }

    /// Remove a thread; true iff a document existed.
    pub async fn delete(&self, thread_id: &str) -> Result<bool> {
        let Ok(object_id) = ObjectId::parse_str(thread_id) else {
            return Ok(false);
        };

        let result = self.collection.delete_one(doc! { "_id": object_id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn find_and_apply(
        &self,
        thread_id: &str,
        update: bson::Document,
    ) -> Result<Option<Thread>> {
        let Ok(object_id) = ObjectId::parse_str(thread_id) else {
            return Ok(None);
        };

        let thread = self
            .collection
            .find_one_and_update(doc! { "_id": object_id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(thread.map(Into::into))
    }
}

/// Missing or blank titles become the placeholder.
fn resolve_title(title: Option<String>) -> String {
    title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_THREAD_TITLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_title_gets_placeholder() {
        assert_eq!(resolve_title(None), DEFAULT_THREAD_TITLE);
    }

    #[test]
    fn blank_title_gets_placeholder() {
        assert_eq!(resolve_title(Some("   ".to_string())), DEFAULT_THREAD_TITLE);
        assert_eq!(resolve_title(Some(String::new())), DEFAULT_THREAD_TITLE);
    }

    #[test]
    fn provided_title_is_trimmed_and_kept() {
        assert_eq!(resolve_title(Some("  旅行の計画  ".to_string())), "旅行の計画");
    }
}
