use super::types::{ChatRequest, InferenceResult};
use crate::{
    config::GenerationParams,
    llm::GenerativeClient,
    Result,
};
use std::sync::Arc;
use tracing::debug;

/// Fixed framing prepended to every user prompt.
pub const PERSONA_FRAMING: &str =
    "You are Sibyl, a helpful and knowledgeable assistant. Answer the user's request clearly and accurately.";

/// Turns a validated chat request into a model response.
///
/// Holds no per-call state: the client and generation parameters are set
/// once at startup and shared across invocations.
pub struct InferenceFlow {
    client: Arc<dyn GenerativeClient>,
    params: GenerationParams,
}

impl InferenceFlow {
    pub fn new(client: Arc<dyn GenerativeClient>, params: GenerationParams) -> Self {
        Self { client, params }
    }

    /// Run one inference. The composite prompt carries the persona framing
    /// and the caller's prompt; the conversation history is threaded to the
    /// model as structured context so turn boundaries survive.
    pub async fn run(&self, request: &ChatRequest) -> Result<InferenceResult> {
        request.validate()?;

        let prompt = compose_prompt(&request.user_prompt);

        debug!(
            "Running inference flow with {} history turns",
            request.conversation_history.len()
        );

        let reply = self
            .client
            .generate(&prompt, &request.conversation_history, &self.params)
            .await?;

        Ok(InferenceResult { text: reply.text })
    }
}

fn compose_prompt(user_prompt: &str) -> String {
    format!("{}\n\n{}", PERSONA_FRAMING, user_prompt)
}
