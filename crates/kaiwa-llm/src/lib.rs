pub mod error;
pub mod gemini;
pub mod traits;
pub mod types;

pub use error::LlmError;
pub use gemini::GeminiClient;
pub use traits::TextGenerator;
pub use types::{ChatTurn, Role};
