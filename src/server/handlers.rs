use super::types::{ApiError, ResponseEnvelope};
use crate::{
    auth,
    config::AuthConfig,
    flow::{ChatRequest, ChatTurn, InferenceFlow},
    store::DocumentStore,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub flow: Arc<InferenceFlow>,
    /// Reserved collaborator; the chat path does not touch it.
    pub store: Arc<DocumentStore>,
    pub auth: AuthConfig,
}

/// The callable chat endpoint. Gates run in a fixed order: auth, then
/// payload validation, then flow execution. Exactly one success envelope
/// or one mapped error per call.
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let request_id = Uuid::new_v4();

    // Auth gate: an unauthenticated request never reaches validation.
    let Some(caller) = auth::authenticate(&headers, state.auth.gateway_secret.as_deref()) else {
        warn!("Rejected unauthenticated chat request {}", request_id);
        return Err(ApiError::Unauthenticated);
    };

    info!(
        "Received chat request {} from uid {}",
        request_id, caller.uid
    );

    // Validation gate
    let Json(payload) =
        body.map_err(|e| ApiError::invalid_argument(format!("Request body is not valid JSON: {}", e)))?;
    let request = parse_request(&payload)?;

    // Execution: the flow's failures are diagnostic-only; the caller sees
    // a generic internal error.
    match state.flow.run(&request).await {
        Ok(result) => {
            info!("Chat request {} completed for uid {}", request_id, caller.uid);
            Ok(Json(ResponseEnvelope {
                response: result.text,
            }))
        }
        Err(e) => {
            error!("Chat request {} failed: {}", request_id, e);
            Err(ApiError::Internal)
        }
    }
}

/// Extract and validate the flow input from the raw payload.
fn parse_request(payload: &Value) -> Result<ChatRequest, ApiError> {
    let user_prompt = match payload.get("userPrompt") {
        None | Some(Value::Null) => {
            return Err(ApiError::invalid_argument("userPrompt is required"));
        }
        Some(Value::String(prompt)) if prompt.is_empty() => {
            return Err(ApiError::invalid_argument("userPrompt must not be empty"));
        }
        Some(Value::String(prompt)) => prompt.clone(),
        Some(_) => {
            return Err(ApiError::invalid_argument("userPrompt must be a string"));
        }
    };

    let conversation_history: Vec<ChatTurn> = match payload.get("conversationHistory") {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            ApiError::invalid_argument(format!("conversationHistory is malformed: {}", e))
        })?,
    };

    let request = ChatRequest::new(user_prompt, conversation_history);
    request
        .validate()
        .map_err(|e| ApiError::invalid_argument(e.to_string()))?;

    Ok(request)
}
