use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Role of a historical conversation turn. The model API only knows these
/// two roles; anything else is rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPart {
    pub text: String,
}

/// One historical conversation turn, owned by the caller and passed
/// through to the model unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub parts: Vec<TurnPart>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            parts: vec![TurnPart { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            parts: vec![TurnPart { text: text.into() }],
        }
    }
}

/// Validated input of the inference flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub user_prompt: String,
    pub conversation_history: Vec<ChatTurn>,
}

impl ChatRequest {
    pub fn new(user_prompt: impl Into<String>, conversation_history: Vec<ChatTurn>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
            conversation_history,
        }
    }

    /// Enforce the flow's input contract. The endpoint validates raw
    /// payloads before constructing a request, but the flow checks its own
    /// boundary too so it can be invoked directly.
    pub fn validate(&self) -> Result<()> {
        if self.user_prompt.is_empty() {
            return Err(Error::invalid_request("user_prompt must not be empty"));
        }
        for (index, turn) in self.conversation_history.iter().enumerate() {
            if turn.parts.is_empty() {
                return Err(Error::invalid_request(format!(
                    "conversation turn {} has no parts",
                    index
                )));
            }
        }
        Ok(())
    }
}

/// Plain-text output of a successful flow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResult {
    pub text: String,
}
