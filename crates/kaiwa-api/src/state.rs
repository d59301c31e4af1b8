use std::sync::Arc;

use kaiwa_chat::ChatService;
use kaiwa_persist::{ConversationStore, MongoGateway};

use crate::config::Config;

/// Shared application state passed to all handlers.
///
/// Everything is behind Arc so clones are cheap across async tasks; there
/// is no per-request mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gateway: Arc<MongoGateway>,
    pub store: Arc<dyn ConversationStore>,
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(
        config: Config,
        gateway: Arc<MongoGateway>,
        store: Arc<dyn ConversationStore>,
        chat: ChatService,
    ) -> Self {
        Self {
            config: Arc::new(config),
            gateway,
            store,
            chat: Arc::new(chat),
        }
    }
}
