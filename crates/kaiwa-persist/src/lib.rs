pub mod error;
pub mod models;
pub mod mongo;
pub mod store;

pub use error::PersistError;
pub use models::{Message, Thread, DEFAULT_THREAD_TITLE};
pub use mongo::gateway::MongoGateway;
pub use mongo::repositories::{MessageRepository, ThreadRepository};
pub use store::{ConversationStore, MongoStore};
