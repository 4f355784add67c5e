use std::sync::Arc;

use crate::{
    config, error, info,
    qobuz::QobuzConnector,
    server::{AppState, start_api_server},
    warning,
};

pub async fn serve(open: bool) {
    let connector = match QobuzConnector::from_env() {
        Ok(connector) => connector,
        Err(e) => error!("{}", e),
    };

    let state = AppState::with_authenticator(Arc::new(connector));
    let url = format!("http://{}", config::server_addr());
    info!("Starting web app on {}", url);

    if open && webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    }

    if let Err(e) = start_api_server(state).await {
        error!("Web app stopped: {}", e);
    }
}
