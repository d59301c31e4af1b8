use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kaiwa_api::{app::build_router, config::Config, state::AppState};
use kaiwa_chat::ChatService;
use kaiwa_llm::{GeminiClient, TextGenerator};
use kaiwa_persist::{ConversationStore, MongoGateway, MongoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting Kaiwa API server");
    tracing::info!(
        environment = %config.environment,
        "Config loaded: {}:{}",
        config.server.host,
        config.server.port
    );

    // Persistence gateway. A failed startup probe is logged, not fatal:
    // the driver reconnects lazily and the health check reports degraded.
    let gateway = Arc::new(
        MongoGateway::open(
            &config.mongodb_uri,
            &config.mongodb.database,
            Duration::from_millis(config.mongodb.timeout_ms),
        )
        .await?,
    );
    if gateway.ping().await.is_err() {
        tracing::warn!("MongoDB unreachable at startup; serving degraded");
    }

    let store: Arc<dyn ConversationStore> = Arc::new(MongoStore::new(&gateway));

    tracing::info!("Initializing generation client");
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.llm.model.clone(),
    )?);

    let chat = ChatService::new(store.clone(), generator);
    let state = AppState::new(config.clone(), gateway.clone(), store, chat);

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    gateway.close().await;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
