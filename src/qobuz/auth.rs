use std::sync::Arc;

use async_trait::async_trait;
use md5::{Digest, Md5};
use reqwest::Client;
use tracing::debug;

use crate::{
    Error, Res, config,
    qobuz::{Authenticator, QobuzApi, QobuzClient, read_json},
    types::LoginApiResponse,
};

/// Hashes a plain password the way `user/login` expects it: lowercase hex MD5.
///
/// # Arguments
///
/// * `password` - The plain password as typed by the user
///
/// # Returns
///
/// The 32 character lowercase hex digest of the UTF-8 bytes.
///
/// # Example
///
/// ```
/// let hash = hash_password("password");
/// assert_eq!(hash, "5f4dcc3b5aa765d61d8327deb882cf99");
/// ```
pub fn hash_password(password: &str) -> String {
    let hash = Md5::digest(password.as_bytes());
    format!("{:x}", hash)
}

/// Logs users in against `user/login` and hands out [`QobuzClient`]s.
#[derive(Debug, Clone)]
pub struct QobuzConnector {
    http: Client,
    base_url: String,
    app_id: String,
}

impl QobuzConnector {
    /// Creates a connector with its own HTTP connection pool.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root without trailing slash, see [`config::qobuz_apiurl`]
    /// * `app_id` - Qobuz application id
    pub fn new(base_url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            app_id: app_id.into(),
        }
    }

    /// Builds a connector from `QOBUZ_API_URL` and `QOBUZ_APP_ID`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `QOBUZ_APP_ID` is not set.
    pub fn from_env() -> Res<Self> {
        Ok(Self::new(config::qobuz_apiurl(), config::qobuz_app_id()?))
    }

    /// Performs the login call and returns the user id with a bound client.
    ///
    /// # Arguments
    ///
    /// * `email` - Account email or user name
    /// * `password_hash` - Output of [`hash_password`]
    ///
    /// # Returns
    ///
    /// The Qobuz user id and a [`QobuzClient`] carrying the user auth token,
    /// sharing this connector's HTTP connection pool.
    ///
    /// # Errors
    ///
    /// - [`Error::Auth`] when Qobuz rejects the credentials or the answer
    ///   carries no user or no token
    /// - [`Error::Http`] on transport failures
    pub async fn login(&self, email: &str, password_hash: &str) -> Res<(String, QobuzClient)> {
        let api_url = format!("{uri}/user/login", uri = self.base_url);

        let response = self
            .http
            .get(&api_url)
            .header("X-App-Id", &self.app_id)
            .query(&[
                ("email", email),
                ("password", password_hash),
                ("app_id", self.app_id.as_str()),
            ])
            .send()
            .await?;

        let login = match read_json::<LoginApiResponse>(response).await {
            Ok(login) => login,
            Err(Error::Api { message, .. }) => return Err(Error::Auth(message)),
            Err(e) => return Err(e),
        };

        let user_id = login
            .user
            .and_then(|u| u.id)
            .ok_or_else(|| Error::Auth("login response carried no user".to_string()))?;
        let token = login
            .user_auth_token
            .ok_or_else(|| Error::Auth("login response carried no auth token".to_string()))?;

        debug!(user_id = %user_id, "Qobuz login succeeded");

        let client = QobuzClient::new(
            self.http.clone(),
            self.base_url.clone(),
            self.app_id.clone(),
            token,
        );
        Ok((user_id, client))
    }
}

#[async_trait]
impl Authenticator for QobuzConnector {
    async fn authenticate(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Res<(String, Arc<dyn QobuzApi>)> {
        let (user_id, client) = self.login(email, password_hash).await?;
        Ok((user_id, Arc::new(client)))
    }
}
