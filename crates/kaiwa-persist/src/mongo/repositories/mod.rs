pub mod message;
pub mod thread;

pub use message::MessageRepository;
pub use thread::ThreadRepository;
