mod runner;
mod types;

pub use runner::{InferenceFlow, PERSONA_FRAMING};
pub use types::{ChatRequest, ChatTurn, InferenceResult, TurnPart, TurnRole};
