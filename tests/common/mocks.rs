use async_trait::async_trait;
use sibyl_rust::{
    config::GenerationParams,
    flow::ChatTurn,
    llm::{GenerativeClient, ModelReply},
    Error, Result,
};
use std::sync::{Arc, Mutex};

/// One recorded call to the mock client.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub history: Vec<ChatTurn>,
    pub params: GenerationParams,
}

/// Mock generative client for testing.
#[derive(Debug)]
pub struct MockGenerativeClient {
    pub replies: Arc<Mutex<Vec<ModelReply>>>,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    pub error: Option<String>,
    pub echo: bool,
}

impl MockGenerativeClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            error: None,
            echo: false,
        }
    }

    pub fn with_replies(self, replies: Vec<&str>) -> Self {
        *self.replies.lock().unwrap() = replies
            .into_iter()
            .map(|text| ModelReply {
                text: text.to_string(),
            })
            .collect();
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Echo mode: every call returns the prompt it received.
    pub fn echoing(mut self) -> Self {
        self.echo = true;
        self
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeClient for MockGenerativeClient {
    async fn generate(
        &self,
        prompt: &str,
        history: &[ChatTurn],
        params: &GenerationParams,
    ) -> Result<ModelReply> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            history: history.to_vec(),
            params: params.clone(),
        });

        if let Some(ref error) = self.error {
            return Err(Error::model(error.clone()));
        }

        if self.echo {
            return Ok(ModelReply {
                text: prompt.to_string(),
            });
        }

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::model("No more mock replies available"));
        }

        Ok(replies.remove(0))
    }
}

impl Default for MockGenerativeClient {
    fn default() -> Self {
        Self::new()
    }
}
