//! # API Module
//!
//! HTTP endpoints of the web app. The handlers are a thin layer over the
//! [`crate::pipeline`] operations: they resolve the caller's session, check
//! the request, and either answer directly or start a background run whose
//! results travel through the progress stream.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - `POST /api/auth/login` - [`login`]
//! - `POST /api/auth/logout` - [`logout`]
//! - `GET /api/auth/validate` - [`validate`]
//!
//! ### Playlists
//!
//! - `GET /api/playlists/search` - [`search_playlists`]
//! - `GET /api/playlists/{playlist_id}/tracks` - [`playlist_tracks`]
//!
//! ### Favorites
//!
//! - `POST /api/favorites/import` - [`import`] (background run)
//! - `GET /api/favorites/current` - [`current`]
//! - `GET /api/favorites/search` - [`search_favorites`]
//! - `GET /api/favorites/preview` - [`preview`]
//! - `DELETE /api/favorites/delete-filtered` - [`delete_filtered`] (background run)
//! - `DELETE /api/favorites/delete-all` - [`delete_all`] (background run)
//!
//! ### Progress and monitoring
//!
//! - `GET /hub/progress` - [`progress_stream`], Server-Sent Events
//! - `GET /health` - [`health`]
//!
//! ## Headers
//!
//! Authenticated endpoints read the session id from `X-Session-Id`. Endpoints
//! that start a background run also need `X-Connection-Id`, the id announced
//! by the `Connected` event of an open progress stream. A background run only
//! answers `202 Accepted`; its outcome is observable on that stream alone.

mod auth;
mod error;
mod favorites;
mod health;
mod playlists;
mod progress;
mod session;

use axum::http::HeaderMap;

pub use auth::{login, logout, validate};
pub use error::ApiError;
pub use favorites::{current, delete_all, delete_filtered, import, preview};
pub use favorites::search as search_favorites;
pub use health::health;
pub use playlists::search as search_playlists;
pub use playlists::tracks as playlist_tracks;
pub use progress::{CONNECTED_EVENT, HubSink, PROGRESS_EVENT, ProgressHub, progress_stream};
pub use session::CurrentSession;

pub const SESSION_HEADER: &str = "x-session-id";
pub const CONNECTION_HEADER: &str = "x-connection-id";

/// Non-empty header value as an owned string.
pub(crate) fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
