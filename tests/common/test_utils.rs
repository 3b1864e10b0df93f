use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use serde_json::Value;
use sibyl_rust::{
    auth::HEADER_USER_ID,
    config::{AuthConfig, Config, GenerationParams, LogsConfig, ModelConfig, ServerConfig},
    flow::InferenceFlow,
    llm::GenerativeClient,
    server::{self, handlers::AppState},
    store::DocumentStore,
};
use std::sync::Arc;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: ":memory:".to_string(),
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        model: ModelConfig {
            name: "gemini-2.0-flash".to_string(),
            api_key: "test-api-key".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            generation: GenerationParams::default(),
        },
        auth: AuthConfig::default(),
    }
}

/// Build app state around a (usually mocked) generative client.
pub async fn create_test_state(client: Arc<dyn GenerativeClient>, auth: AuthConfig) -> AppState {
    let config = create_test_config();
    let store = DocumentStore::connect(&config.server.database_path)
        .await
        .unwrap();
    let flow = InferenceFlow::new(client, config.model.generation);

    AppState {
        flow: Arc::new(flow),
        store: Arc::new(store),
        auth,
    }
}

/// Build the full router around a mocked client, no gateway secret.
pub async fn create_test_app(client: Arc<dyn GenerativeClient>) -> Router {
    server::router(create_test_state(client, AuthConfig::default()).await)
}

/// POST /chat request carrying a verified caller identity.
pub fn authenticated_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .header(HEADER_USER_ID, "test-user")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// POST /chat request with no identity headers at all.
pub fn anonymous_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body back as JSON.
pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
