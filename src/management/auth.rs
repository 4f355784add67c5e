use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    Error, Res,
    management::session::{Session, SessionStore},
    qobuz::{Authenticator, hash_password},
};

/// Login, lookup and logout on top of a [`SessionStore`].
#[derive(Clone)]
pub struct AuthService {
    authenticator: Arc<dyn Authenticator>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(authenticator: Arc<dyn Authenticator>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            authenticator,
            sessions,
        }
    }

    /// Authenticates against Qobuz and registers a new session.
    ///
    /// Blank credentials are rejected before any upstream call. No session is
    /// created when Qobuz refuses the login.
    pub async fn login(&self, email: &str, password: &str) -> Res<Session> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(Error::Auth("Email and password are required".to_string()));
        }

        let password_hash = hash_password(password);
        let (user_id, client) = match self.authenticator.authenticate(email, &password_hash).await
        {
            Ok(auth) => auth,
            Err(e) => {
                warn!(error = %e, "login rejected");
                return Err(e);
            }
        };

        let session = Session::new(user_id, client);
        self.sessions.put(session.clone()).await;
        info!(user_id = %session.user_id, "session created");

        Ok(session)
    }

    pub async fn session(&self, session_id: &str) -> Option<Session> {
        if session_id.is_empty() {
            return None;
        }
        self.sessions.get(session_id).await
    }

    pub async fn logout(&self, session_id: &str) {
        self.sessions.remove(session_id).await;
    }
}
