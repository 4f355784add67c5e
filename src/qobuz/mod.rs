//! # Qobuz Integration Module
//!
//! Thin typed client for the Qobuz JSON API. It only covers what the favorites
//! pipeline needs: login, playlist search, playlist track pages, favorite
//! track pages, and adding or removing favorites.
//!
//! ```text
//! Pipeline / Management
//!          ↓
//! QobuzApi + Authenticator (trait seams)
//!     ├── auth       (user/login, password hashing)
//!     ├── playlists  (playlist/search, playlist/get)
//!     └── favorites  (favorite/getUserFavorites, favorite/create, favorite/delete)
//!          ↓
//! reqwest → https://www.qobuz.com/api.json/0.2
//! ```
//!
//! The pipeline never talks to [`QobuzClient`] directly. It works against the
//! [`QobuzApi`] trait so runs can be driven by any implementation, and the
//! session registry obtains clients through the [`Authenticator`] trait.
//!
//! No retries happen here: a failing call is reported as an [`Error`] and the
//! caller decides what to do with it.

pub mod auth;
pub mod favorites;
pub mod playlists;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    Error, Res,
    types::{PlaylistSummary, TrackSummary},
};

pub use auth::{QobuzConnector, hash_password};

/// Operations the pipeline needs from an authenticated Qobuz client.
///
/// Page operations return at most `limit` items starting at `offset`. The
/// mutations return `Ok(true)` when Qobuz acknowledged the change and
/// `Ok(false)` when it answered without acknowledging it.
#[async_trait]
pub trait QobuzApi: Send + Sync {
    /// Searches playlists by free text. See [`playlists::search`].
    async fn search_playlists(
        &self,
        term: &str,
        limit: usize,
        offset: usize,
    ) -> Res<Vec<PlaylistSummary>>;

    /// One page of a playlist's tracks. See [`playlists::get_tracks_page`].
    async fn get_playlist_page(
        &self,
        playlist_id: &str,
        limit: usize,
        offset: usize,
    ) -> Res<Vec<TrackSummary>>;

    /// One page of a user's favorite tracks. See [`favorites::get_page`].
    async fn get_favorites_page(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> Res<Vec<TrackSummary>>;

    /// Adds all `track_ids` to favorites in a single call.
    async fn add_favorites(&self, track_ids: &[String]) -> Res<bool>;

    /// Removes all `track_ids` from favorites in a single call.
    async fn remove_favorites(&self, track_ids: &[String]) -> Res<bool>;
}

/// Turns credentials into an authenticated client.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the Qobuz user id and a client bound to that user.
    async fn authenticate(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Res<(String, Arc<dyn QobuzApi>)>;
}

/// Authenticated HTTP client for one Qobuz user.
///
/// Every request carries the `X-App-Id` and `X-User-Auth-Token` headers.
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct QobuzClient {
    http: Client,
    base_url: String,
    app_id: String,
    user_auth_token: String,
}

impl QobuzClient {
    /// Binds an existing HTTP client to one user's auth token.
    ///
    /// Normally obtained from [`QobuzConnector::login`] rather than built by hand.
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        user_auth_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            app_id: app_id.into(),
            user_auth_token: user_auth_token.into(),
        }
    }

    /// Sends an authenticated GET to `{base_url}/{endpoint}` and decodes the JSON body.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Path below the API root, e.g. `playlist/search`
    /// * `query` - Query string pairs
    ///
    /// # Errors
    ///
    /// See [`read_json`].
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Res<T> {
        let api_url = format!("{uri}/{endpoint}", uri = self.base_url);

        let response = self
            .http
            .get(&api_url)
            .header("X-App-Id", &self.app_id)
            .header("X-User-Auth-Token", &self.user_auth_token)
            .query(query)
            .send()
            .await?;

        read_json(response).await
    }
}

#[async_trait]
impl QobuzApi for QobuzClient {
    async fn search_playlists(
        &self,
        term: &str,
        limit: usize,
        offset: usize,
    ) -> Res<Vec<PlaylistSummary>> {
        playlists::search(self, term, limit, offset).await
    }

    async fn get_playlist_page(
        &self,
        playlist_id: &str,
        limit: usize,
        offset: usize,
    ) -> Res<Vec<TrackSummary>> {
        playlists::get_tracks_page(self, playlist_id, limit, offset).await
    }

    async fn get_favorites_page(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> Res<Vec<TrackSummary>> {
        favorites::get_page(self, user_id, limit, offset).await
    }

    async fn add_favorites(&self, track_ids: &[String]) -> Res<bool> {
        favorites::create(self, track_ids).await
    }

    async fn remove_favorites(&self, track_ids: &[String]) -> Res<bool> {
        favorites::delete(self, track_ids).await
    }
}

/// Decodes a JSON body, turning non-success statuses into [`Error::Api`].
///
/// # Errors
///
/// - [`Error::Api`] with the status code and the `message` of the Qobuz
///   error body (or the raw body) for any non-2xx answer
/// - [`Error::Http`] when a successful body is not the expected JSON
pub(crate) async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Res<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        });
    }

    Ok(response.json::<T>().await?)
}

/// Qobuz errors look like `{"status":"error","code":401,"message":"..."}`.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
