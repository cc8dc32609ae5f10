//! Skirmish Engine library.
//!
//! Server side of the shared combat table: one canonical document, edited by
//! a DM and any number of players over WebSocket, with role projection and
//! per-page undo/redo.
//!
//! ## Structure
//!
//! - `stores/` - Canonical document and connection roles
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP and WebSocket entry points
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod stores;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use app::App;

use api::websocket::WsState;

/// Build the full router: HTTP routes plus the `/ws` upgrade endpoint.
pub fn build_router(app: Arc<App>, ws_state: Arc<WsState>) -> Router {
    api::http::routes()
        .with_state(app)
        .route("/ws", get(api::websocket::ws_handler).with_state(ws_state))
        .layer(TraceLayer::new_for_http())
}
