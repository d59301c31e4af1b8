pub mod message;
pub mod thread;

pub use message::Message;
pub use thread::{Thread, DEFAULT_THREAD_TITLE};
