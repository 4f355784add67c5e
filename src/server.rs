use std::{net::SocketAddr, path::PathBuf, str::FromStr, sync::Arc};

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    Error, Res, api, config,
    management::{AuthService, InMemorySessionStore, SessionStore},
    pipeline::Pacing,
    qobuz::Authenticator,
};

/// Shared state of the web app.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub hub: api::ProgressHub,
    pub pacing: Pacing,
}

impl AppState {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        sessions: Arc<dyn SessionStore>,
        pacing: Pacing,
    ) -> Self {
        Self {
            auth: AuthService::new(authenticator, sessions),
            hub: api::ProgressHub::new(),
            pacing,
        }
    }

    /// Production state: in-memory sessions and default pacing.
    pub fn with_authenticator(authenticator: Arc<dyn Authenticator>) -> Self {
        Self::new(
            authenticator,
            Arc::new(InMemorySessionStore::new()),
            Pacing::default(),
        )
    }
}

/// Builds the router. With `static_dir` set, unknown paths are served from
/// there and fall back to its `index.html` for client-side routing.
pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/api/auth/login", post(api::login))
        .route("/api/auth/logout", post(api::logout))
        .route("/api/auth/validate", get(api::validate))
        .route("/api/playlists/search", get(api::search_playlists))
        .route(
            "/api/playlists/{playlist_id}/tracks",
            get(api::playlist_tracks),
        )
        .route("/api/favorites/import", post(api::import))
        .route("/api/favorites/current", get(api::current))
        .route("/api/favorites/search", get(api::search_favorites))
        .route("/api/favorites/preview", get(api::preview))
        .route("/api/favorites/delete-filtered", delete(api::delete_filtered))
        .route("/api/favorites/delete-all", delete(api::delete_all))
        .route("/hub/progress", get(api::progress_stream))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => {
            let index = dir.join("index.html");
            app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => app,
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| Error::Config(format!("Failed to parse server address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "web app listening");

    axum::serve(listener, router(state, config::static_dir())).await?;
    Ok(())
}
