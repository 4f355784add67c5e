#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use qobuzfav::{
    Error, Res,
    management::Session,
    qobuz::{Authenticator, QobuzApi},
    types::{PlaylistSummary, ProgressUpdate, TrackSummary},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub const USER_ID: &str = "user-1";
pub const FAVORITES: &str = "favorites";

pub fn track(id: &str, title: &str, artist: &str, album: Option<&str>) -> TrackSummary {
    TrackSummary {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: album.map(str::to_string),
        duration: Some(180),
    }
}

pub fn numbered_tracks(prefix: &str, count: usize) -> Vec<TrackSummary> {
    (0..count)
        .map(|i| track(&format!("{}{}", prefix, i), &format!("Song {}", i), "Artist", None))
        .collect()
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn upstream_error() -> Error {
    Error::Api {
        status: 500,
        message: "upstream failure".to_string(),
    }
}

/// In-memory stand-in for the Qobuz API that records every call.
#[derive(Default)]
pub struct FakeQobuz {
    pub playlists: HashMap<String, Vec<TrackSummary>>,
    pub favorites: Mutex<Vec<TrackSummary>>,
    pub search_results: Vec<PlaylistSummary>,
    pub search_fails: bool,
    /// (listing, offset) pairs whose page fetch fails; listing is a playlist id or `FAVORITES`
    pub broken_pages: HashSet<(String, usize)>,
    /// A multi-id mutation containing one of these ids fails as a whole
    pub batch_poison: HashSet<String>,
    /// A single-id mutation for one of these ids fails
    pub single_failures: HashSet<String>,
    /// Mutations succeed at transport level but are not acknowledged
    pub unacknowledged: bool,
    pub add_calls: Mutex<Vec<Vec<String>>>,
    pub remove_calls: Mutex<Vec<Vec<String>>>,
    pub page_calls: Mutex<Vec<(String, usize, usize)>>,
}

impl FakeQobuz {
    pub fn with_playlist(mut self, id: &str, tracks: Vec<TrackSummary>) -> Self {
        self.playlists.insert(id.to_string(), tracks);
        self
    }

    pub fn with_favorites(self, tracks: Vec<TrackSummary>) -> Self {
        *self.favorites.lock().unwrap() = tracks;
        self
    }

    pub fn add_calls(&self) -> Vec<Vec<String>> {
        self.add_calls.lock().unwrap().clone()
    }

    pub fn remove_calls(&self) -> Vec<Vec<String>> {
        self.remove_calls.lock().unwrap().clone()
    }

    pub fn page_calls(&self) -> Vec<(String, usize, usize)> {
        self.page_calls.lock().unwrap().clone()
    }

    fn page(
        &self,
        listing: &str,
        items: &[TrackSummary],
        limit: usize,
        offset: usize,
    ) -> Res<Vec<TrackSummary>> {
        self.page_calls
            .lock()
            .unwrap()
            .push((listing.to_string(), limit, offset));

        if self.broken_pages.contains(&(listing.to_string(), offset)) {
            return Err(upstream_error());
        }
        Ok(items.iter().skip(offset).take(limit).cloned().collect())
    }

    fn mutate(&self, track_ids: &[String], calls: &Mutex<Vec<Vec<String>>>) -> Res<bool> {
        calls.lock().unwrap().push(track_ids.to_vec());

        if track_ids.len() > 1 && track_ids.iter().any(|id| self.batch_poison.contains(id)) {
            return Err(upstream_error());
        }
        if track_ids.len() == 1 && self.single_failures.contains(&track_ids[0]) {
            return Err(upstream_error());
        }
        Ok(!self.unacknowledged)
    }
}

#[async_trait]
impl QobuzApi for FakeQobuz {
    async fn search_playlists(
        &self,
        _term: &str,
        limit: usize,
        offset: usize,
    ) -> Res<Vec<PlaylistSummary>> {
        if self.search_fails {
            return Err(upstream_error());
        }
        Ok(self
            .search_results
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_playlist_page(
        &self,
        playlist_id: &str,
        limit: usize,
        offset: usize,
    ) -> Res<Vec<TrackSummary>> {
        let Some(tracks) = self.playlists.get(playlist_id) else {
            return Err(Error::Api {
                status: 404,
                message: "Playlist not found".to_string(),
            });
        };
        self.page(playlist_id, tracks, limit, offset)
    }

    async fn get_favorites_page(
        &self,
        _user_id: &str,
        limit: usize,
        offset: usize,
    ) -> Res<Vec<TrackSummary>> {
        let favorites = self.favorites.lock().unwrap().clone();
        self.page(FAVORITES, &favorites, limit, offset)
    }

    async fn add_favorites(&self, track_ids: &[String]) -> Res<bool> {
        self.mutate(track_ids, &self.add_calls)
    }

    async fn remove_favorites(&self, track_ids: &[String]) -> Res<bool> {
        let acknowledged = self.mutate(track_ids, &self.remove_calls)?;
        if acknowledged {
            self.favorites
                .lock()
                .unwrap()
                .retain(|t| !track_ids.contains(&t.id));
        }
        Ok(acknowledged)
    }
}

pub fn session_for(fake: &Arc<FakeQobuz>) -> Session {
    let client: Arc<dyn QobuzApi> = fake.clone();
    Session::new(USER_ID, client)
}

pub fn progress_channel() -> (UnboundedSender<ProgressUpdate>, UnboundedReceiver<ProgressUpdate>) {
    mpsc::unbounded_channel()
}

pub fn drain(rx: &mut UnboundedReceiver<ProgressUpdate>) -> Vec<ProgressUpdate> {
    let mut updates = Vec::new();
    while let Ok(update) = rx.try_recv() {
        updates.push(update);
    }
    updates
}

/// Checks the invariants every run must satisfy and returns the final snapshot.
pub fn assert_well_formed(updates: &[ProgressUpdate]) -> ProgressUpdate {
    assert!(!updates.is_empty(), "run emitted no progress");

    for update in updates {
        assert_eq!(
            update.processed_tracks,
            update.successful_tracks + update.failed_tracks,
            "counters out of balance in {:?}",
            update
        );
        assert!(update.processed_tracks <= update.total_tracks);
    }

    for pair in updates.windows(2) {
        assert!(pair[1].processed_tracks >= pair[0].processed_tracks);
        assert!(pair[1].successful_tracks >= pair[0].successful_tracks);
        assert!(pair[1].failed_tracks >= pair[0].failed_tracks);
    }

    let completed: Vec<_> = updates.iter().filter(|u| u.is_completed).collect();
    assert_eq!(completed.len(), 1, "exactly one completed snapshot expected");

    let last = updates.last().cloned().unwrap();
    assert!(last.is_completed, "the completed snapshot must be the last one");
    last
}

/// Accepts one fixed account and hands out a shared fake client.
pub struct FakeAuthenticator {
    pub email: String,
    pub password_hash: String,
    pub client: Arc<FakeQobuz>,
    pub calls: Mutex<usize>,
}

impl FakeAuthenticator {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password_hash: qobuzfav::qobuz::hash_password(password),
            client: Arc::new(FakeQobuz::default()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Authenticator for FakeAuthenticator {
    async fn authenticate(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Res<(String, Arc<dyn QobuzApi>)> {
        *self.calls.lock().unwrap() += 1;
        if email == self.email && password_hash == self.password_hash {
            let client: Arc<dyn QobuzApi> = self.client.clone();
            Ok((USER_ID.to_string(), client))
        } else {
            Err(Error::Auth("Invalid username/email and password combination.".to_string()))
        }
    }
}
