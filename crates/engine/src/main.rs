//! Skirmish Engine - Main entry point.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skirmish_domain::GameState;
use skirmish_engine::{
    api::{websocket::WsState, ConnectionManager},
    build_router,
    config::{load_dotenv_from_repo_root, EngineConfig},
    infrastructure::{
        autosave::Autosave,
        clock::SystemClock,
        persistence::JsonFileStore,
        ports::{ClockPort, PersistencePort},
    },
    stores::{GameStore, RoleRegistry},
    App,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skirmish_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Skirmish Engine");

    let config = EngineConfig::from_env()?;

    let persistence: Arc<dyn PersistencePort> =
        Arc::new(JsonFileStore::new(config.state_file.clone()));
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    let initial = match persistence.load().await {
        Ok(Some(document)) => {
            tracing::info!(
                path = %config.state_file.display(),
                characters = document.characters.len(),
                "Loaded saved game state"
            );
            document
        }
        Ok(None) => {
            tracing::info!(path = %config.state_file.display(), "No saved game state, starting empty");
            GameState::default()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load game state, starting empty");
            GameState::default()
        }
    };

    let store = Arc::new(GameStore::new(initial));
    let roles = Arc::new(RoleRegistry::new());

    let autosave = if config.autosave_enabled {
        let (autosave, _worker) =
            Autosave::spawn(store.clone(), persistence.clone(), config.autosave_debounce);
        tracing::info!(
            debounce_ms = config.autosave_debounce.as_millis() as u64,
            "Autosave enabled"
        );
        autosave
    } else {
        Autosave::disabled()
    };

    let app = Arc::new(App::new(
        store,
        roles.clone(),
        clock,
        persistence,
        autosave,
    ));

    let ws_state = Arc::new(WsState {
        app: app.clone(),
        connections: Arc::new(ConnectionManager::new(roles)),
    });

    let mut router = build_router(app.clone(), ws_state);

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    let addr = config.listen_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = app.save_now().await {
        tracing::error!(error = %e, "Final save failed");
    } else {
        tracing::info!("Game state saved, shutting down");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
