use std::{collections::HashMap, convert::Infallible, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use tokio::sync::{
    Mutex,
    mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use tracing::{debug, info, warn};

use crate::{
    management::generate_session_id, pipeline::ProgressSink, server::AppState,
    types::ProgressUpdate,
};

pub const CONNECTED_EVENT: &str = "Connected";
pub const PROGRESS_EVENT: &str = "ProgressUpdate";

/// Open progress connections, keyed by connection id.
///
/// Each connection is one unbounded channel, so updates published to it are
/// delivered in the order they were published.
#[derive(Clone, Default)]
pub struct ProgressHub {
    connections: Arc<Mutex<HashMap<String, UnboundedSender<ProgressUpdate>>>>,
}

impl ProgressHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new connection and returns its id with the receiving end.
    pub async fn connect(&self) -> (String, UnboundedReceiver<ProgressUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection_id = generate_session_id();

        let mut connections = self.connections.lock().await;
        connections.retain(|_, tx| !tx.is_closed());
        connections.insert(connection_id.clone(), tx);

        (connection_id, rx)
    }

    pub async fn is_connected(&self, connection_id: &str) -> bool {
        self.connections
            .lock()
            .await
            .get(connection_id)
            .is_some_and(|tx| !tx.is_closed())
    }

    pub async fn disconnect(&self, connection_id: &str) {
        self.connections.lock().await.remove(connection_id);
    }

    /// Number of registered connections, closed ones not yet pruned included.
    pub async fn connection_count(&self) -> usize {
        self.connections.lock().await.len()
    }

    /// Delivers one update. Returns `false` if the connection is gone.
    pub async fn publish(&self, connection_id: &str, update: ProgressUpdate) -> bool {
        let mut connections = self.connections.lock().await;
        let Some(tx) = connections.get(connection_id) else {
            return false;
        };

        if tx.send(update).is_err() {
            connections.remove(connection_id);
            return false;
        }
        true
    }

    /// A sink bound to one connection, handed to a pipeline run.
    pub fn sink(&self, connection_id: impl Into<String>) -> HubSink {
        HubSink {
            hub: self.clone(),
            connection_id: connection_id.into(),
        }
    }
}

/// Unregisters a connection when its event stream is dropped.
struct ConnectionGuard {
    hub: ProgressHub,
    connection_id: String,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let hub = self.hub.clone();
        let connection_id = std::mem::take(&mut self.connection_id);
        runtime.spawn(async move {
            hub.disconnect(&connection_id).await;
            debug!(connection_id = %connection_id, "progress client disconnected");
        });
    }
}

pub struct HubSink {
    hub: ProgressHub,
    connection_id: String,
}

#[async_trait]
impl ProgressSink for HubSink {
    async fn send(&self, update: ProgressUpdate) {
        if !self.hub.publish(&self.connection_id, update).await {
            debug!(connection_id = %self.connection_id, "progress connection gone, update dropped");
        }
    }
}

/// GET /hub/progress - event stream of progress snapshots
///
/// The first event is `Connected` with the connection id as data. Clients
/// pass that id as `X-Connection-Id` when starting a run; every snapshot of
/// the run then arrives as a `ProgressUpdate` event with JSON data. The
/// connection is unregistered as soon as the client goes away.
pub async fn progress_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (connection_id, mut rx) = state.hub.connect().await;
    let connections = state.hub.connection_count().await;
    info!(
        connection_id = %connection_id,
        connections = connections,
        "progress client connected"
    );

    let guard = ConnectionGuard {
        hub: state.hub.clone(),
        connection_id: connection_id.clone(),
    };

    let stream = async_stream::stream! {
        let _guard = guard;
        yield Ok(Event::default().event(CONNECTED_EVENT).data(connection_id.clone()));

        while let Some(update) = rx.recv().await {
            match Event::default().event(PROGRESS_EVENT).json_data(&update) {
                Ok(event) => yield Ok(event),
                Err(e) => warn!(connection_id = %connection_id, error = %e, "cannot encode progress update"),
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
