use std::sync::Arc;

use crate::{
    cli::progress::spinner,
    config, error,
    management::Session,
    qobuz::{QobuzConnector, hash_password},
    success,
};

/// Logs in with `QOBUZ_EMAIL` / `QOBUZ_PASSWORD` and returns a local session.
///
/// Exits the program when credentials are missing or rejected.
pub async fn login() -> Session {
    let email = match config::qobuz_email() {
        Ok(email) => email,
        Err(e) => error!("{}", e),
    };
    let password = match config::qobuz_password() {
        Ok(password) => password,
        Err(e) => error!("{}", e),
    };
    let connector = match QobuzConnector::from_env() {
        Ok(connector) => connector,
        Err(e) => error!("{}", e),
    };

    let pb = spinner("Logging in to Qobuz...");
    let result = connector.login(&email, &hash_password(&password)).await;
    pb.finish_and_clear();

    match result {
        Ok((user_id, client)) => {
            success!("Logged in as user {}", user_id);
            Session::new(user_id, Arc::new(client))
        }
        Err(e) => error!("Login failed: {}", e),
    }
}
