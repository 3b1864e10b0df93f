mod gemini;
mod types;

pub use gemini::{GeminiClient, GenerativeClient, ModelReply};
pub use types::*;
