pub mod handlers;
pub mod types;

use crate::{
    config::Config, flow::InferenceFlow, llm::{GeminiClient, GenerativeClient},
    store::DocumentStore, Result,
};
use axum::{routing::post, Router};
use self::handlers::AppState;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Coarse overall deadline imposed at the hosting boundary. An elapsed
/// deadline aborts the invocation outside the handler's error taxonomy.
pub const INVOCATION_DEADLINE: Duration = Duration::from_secs(300);

pub async fn run(config: Config) -> Result<()> {
    // Initialize the document store
    let db_path =
        std::env::var("DOCUMENT_DB_PATH").unwrap_or_else(|_| config.server.database_path.clone());
    let store = DocumentStore::connect(&db_path).await?;

    // Initialize the model client and the inference flow once; both are
    // shared across invocations.
    let client: Arc<dyn GenerativeClient> = Arc::new(GeminiClient::new(config.model.clone())?);
    let flow = InferenceFlow::new(client, config.model.generation.clone());

    // Create application state
    let app_state = AppState {
        flow: Arc::new(flow),
        store: Arc::new(store),
        auth: config.auth.clone(),
    };

    let app = router(app_state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(INVOCATION_DEADLINE))
        .with_state(state)
}
