use super::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::{
    config::{GenerationParams, ModelConfig},
    flow::ChatTurn,
    Error, Result,
};
use async_trait::async_trait;
use tracing::debug;

/// Client for a generative model. The inference flow depends on this
/// trait, not on a concrete provider.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        history: &[ChatTurn],
        params: &GenerationParams,
    ) -> Result<ModelReply>;
}

#[derive(Debug, Clone)]
pub struct ModelReply {
    pub text: String,
}

/// Gemini `generateContent` client. Constructed once at startup and shared
/// across invocations; each call is a single request with no retries.
pub struct GeminiClient {
    http: reqwest::Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: ModelConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::config(
                "model.api_key is not set; provide it in the config file or via GEMINI_API_KEY",
            ));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            model: config.name,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        history: &[ChatTurn],
        params: &GenerationParams,
    ) -> Result<ModelReply> {
        let request = GenerateContentRequest::new(prompt, history, params);

        debug!(
            "Calling model {} with {} content blocks",
            self.model,
            request.contents.len()
        );

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));
            return Err(Error::model(format!("generateContent failed: {}", message)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(feedback) = &parsed.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(Error::model(format!("prompt was blocked: {}", reason)));
            }
        }

        let text = parsed
            .first_text()
            .ok_or_else(|| Error::model("response contained no text candidate"))?;

        Ok(ModelReply {
            text: text.to_string(),
        })
    }
}
