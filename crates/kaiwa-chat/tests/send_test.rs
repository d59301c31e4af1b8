use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use kaiwa_chat::{ChatService, SendError};
use kaiwa_llm::{ChatTurn, LlmError, Role, TextGenerator};
use kaiwa_persist::error::Result as PersistResult;
use kaiwa_persist::{ConversationStore, Message, Thread, DEFAULT_THREAD_TITLE};

/// In-memory store standing in for MongoDB.
#[derive(Default)]
struct MemoryStore {
    threads: Mutex<Vec<Thread>>,
    messages: Mutex<Vec<Message>>,
    next_id: AtomicUsize,
    touches: AtomicUsize,
}

impl MemoryStore {
    fn with_thread(id: &str) -> Self {
        let store = Self::default();
        let now = Utc::now();
        store.threads.lock().unwrap().push(Thread {
            id: id.to_string(),
            title: DEFAULT_THREAD_TITLE.to_string(),
            created_at: now,
            updated_at: now,
        });
        store
    }

    fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn create_thread(&self, title: Option<String>) -> PersistResult<Thread> {
        let now = Utc::now();
        let thread = Thread {
            id: format!("thread-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            title: title.unwrap_or_else(|| DEFAULT_THREAD_TITLE.to_string()),
            created_at: now,
            updated_at: now,
        };
        self.threads.lock().unwrap().push(thread.clone());
        Ok(thread)
    }

    async fn list_threads(&self) -> PersistResult<Vec<Thread>> {
        Ok(self.threads.lock().unwrap().clone())
    }

    async fn get_thread(&self, thread_id: &str) -> PersistResult<Option<Thread>> {
        Ok(self
            .threads
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == thread_id)
            .cloned())
    }

    async fn rename_thread(&self, thread_id: &str, title: &str) -> PersistResult<Option<Thread>> {
        let mut threads = self.threads.lock().unwrap();
        let thread = threads.iter_mut().find(|t| t.id == thread_id);
        Ok(thread.map(|t| {
            t.title = title.to_string();
            t.updated_at = Utc::now();
            t.clone()
        }))
    }

    async fn touch_thread(&self, thread_id: &str) -> PersistResult<Option<Thread>> {
        self.touches.fetch_add(1, Ordering::SeqCst);
        let mut threads = self.threads.lock().unwrap();
        let thread = threads.iter_mut().find(|t| t.id == thread_id);
        Ok(thread.map(|t| {
            t.updated_at = Utc::now();
            t.clone()
        }))
    }

    async fn delete_thread(&self, thread_id: &str) -> PersistResult<bool> {
        let mut threads = self.threads.lock().unwrap();
        let before = threads.len();
        threads.retain(|t| t.id != thread_id);
        Ok(threads.len() < before)
    }

    async fn insert_message(
        &self,
        thread_id: &str,
        role: Role,
        content: &str,
    ) -> PersistResult<Message> {
        let message = Message {
            id: format!("message-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            thread_id: thread_id.to_string(),
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn list_messages(&self, thread_id: &str) -> PersistResult<Vec<Message>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.thread_id == thread_id)
            .cloned()
            .collect())
    }

    async fn history(&self, thread_id: &str) -> PersistResult<Vec<ChatTurn>> {
        Ok(self
            .list_messages(thread_id)
            .await?
            .into_iter()
            .map(|m| ChatTurn {
                role: m.role,
                content: m.content,
            })
            .collect())
    }

    async fn delete_messages_by_thread(&self, thread_id: &str) -> PersistResult<u64> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| m.thread_id != thread_id);
        Ok((before - messages.len()) as u64)
    }

    async fn delete_message(&self, message_id: &str) -> PersistResult<bool> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| m.id != message_id);
        Ok(messages.len() < before)
    }
}

/// Generator that replies with a fixed text, or always fails.
struct ScriptedGenerator {
    reply: Option<String>,
    seen_histories: Mutex<Vec<Vec<ChatTurn>>>,
}

impl ScriptedGenerator {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            seen_histories: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            seen_histories: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, history: &[ChatTurn]) -> Result<String, LlmError> {
        self.seen_histories.lock().unwrap().push(history.to_vec());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Endpoint {
                status: 429,
                message: "quota exceeded".to_string(),
            }),
        }
    }
}

fn service(
    store: Arc<MemoryStore>,
    generator: Arc<ScriptedGenerator>,
) -> ChatService {
    ChatService::new(store, generator)
}

#[tokio::test]
async fn successful_send_persists_user_and_assistant_pair() {
    let store = Arc::new(MemoryStore::with_thread("t1"));
    let generator = Arc::new(ScriptedGenerator::replying("こんにちは！"));
    let chat = service(store.clone(), generator.clone());

    let exchange = chat.send("t1", "こんにちは").await.unwrap();

    assert_eq!(exchange.user_message.role, Role::User);
    assert_eq!(exchange.user_message.content, "こんにちは");
    assert_eq!(exchange.assistant_message.role, Role::Assistant);
    assert_eq!(exchange.assistant_message.content, "こんにちは！");
    assert_eq!(store.message_count(), 2);
    assert_eq!(store.touches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn content_is_trimmed_before_persistence() {
    let store = Arc::new(MemoryStore::with_thread("t1"));
    let generator = Arc::new(ScriptedGenerator::replying("ok"));
    let chat = service(store.clone(), generator);

    let exchange = chat.send("t1", "  hello  ").await.unwrap();
    assert_eq!(exchange.user_message.content, "hello");
}

#[tokio::test]
async fn unknown_thread_writes_nothing() {
    let store = Arc::new(MemoryStore::default());
    let generator = Arc::new(ScriptedGenerator::replying("ok"));
    let chat = service(store.clone(), generator);

    let err = chat.send("missing", "hello").await.unwrap_err();
    assert!(matches!(err, SendError::ThreadNotFound(_)));
    assert_eq!(store.message_count(), 0);
}

#[tokio::test]
async fn empty_content_writes_nothing() {
    let store = Arc::new(MemoryStore::with_thread("t1"));
    let generator = Arc::new(ScriptedGenerator::replying("ok"));
    let chat = service(store.clone(), generator);

    let err = chat.send("t1", "   ").await.unwrap_err();
    assert!(matches!(err, SendError::EmptyContent));
    assert_eq!(store.message_count(), 0);
    assert_eq!(store.touches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn generation_failure_keeps_user_message() {
    let store = Arc::new(MemoryStore::with_thread("t1"));
    let generator = Arc::new(ScriptedGenerator::failing());
    let chat = service(store.clone(), generator);

    let err = chat.send("t1", "hello").await.unwrap_err();
    match err {
        SendError::Generation { user_message, cause } => {
            assert_eq!(user_message.content, "hello");
            assert!(matches!(cause, LlmError::Endpoint { status: 429, .. }));
        }
        other => panic!("expected Generation error, got {other:?}"),
    }

    // Exactly the user message survives; no assistant turn, no recency bump.
    assert_eq!(store.message_count(), 1);
    assert_eq!(store.touches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn generator_sees_history_including_current_message() {
    let store = Arc::new(MemoryStore::with_thread("t1"));
    let generator = Arc::new(ScriptedGenerator::replying("R"));
    let chat = service(store.clone(), generator.clone());

    chat.send("t1", "M1").await.unwrap();
    chat.send("t1", "M2").await.unwrap();

    let histories = generator.seen_histories.lock().unwrap();
    assert_eq!(histories[0], vec![ChatTurn::user("M1")]);
    assert_eq!(
        histories[1],
        vec![
            ChatTurn::user("M1"),
            ChatTurn::assistant("R"),
            ChatTurn::user("M2"),
        ]
    );
}
