use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_PLAYLIST: &str = "Unknown Playlist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// A track as presented to callers. Identity is the id, everything else is display only.
///
/// Tracks mapped from Qobuz always carry an album, `"Unknown Album"` when
/// Qobuz sent none. An empty id marks a record Qobuz returned without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub tracks_count: u64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: Option<String>,
}

/// Point-in-time counters of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub total_tracks: usize,
    pub processed_tracks: usize,
    pub successful_tracks: usize,
    pub failed_tracks: usize,
    pub current_status: String,
    pub is_completed: bool,
    pub error_message: Option<String>,
}

impl ProgressUpdate {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            current_status: status.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub total_count: usize,
    pub tracks: Vec<TrackSummary>,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResult {
    pub total_count: usize,
    pub sample_tracks: Vec<TrackSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    pub session_id: String,
    pub success: bool,
    pub error_message: Option<String>,
}

impl LoginResponse {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            user_id: String::new(),
            session_id: String::new(),
            success: false,
            error_message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    #[serde(default)]
    pub playlist_ids: Vec<String>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration: String,
}

impl From<&TrackSummary> for TrackTableRow {
    fn from(track: &TrackSummary) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone().unwrap_or_default(),
            duration: track
                .duration
                .map(|d| format!("{}:{:02}", d / 60, d % 60))
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub tracks: u64,
}

// Raw Qobuz records. Qobuz sends numeric ids for tracks and users, so the
// id fields accept both numbers and strings.

#[derive(Debug, Clone, Deserialize)]
pub struct RawPerformer {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAlbum {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrack {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub duration: Option<u64>,
    pub performer: Option<RawPerformer>,
    pub album: Option<RawAlbum>,
}

impl From<RawTrack> for TrackSummary {
    fn from(raw: RawTrack) -> Self {
        Self {
            id: raw.id.unwrap_or_default(),
            title: raw.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            artist: raw
                .performer
                .and_then(|p| p.name)
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: Some(
                raw.album
                    .and_then(|a| a.title)
                    .unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            ),
            duration: raw.duration,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOwner {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlaylist {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub tracks_count: Option<u64>,
    pub description: Option<String>,
    pub owner: Option<RawOwner>,
    pub images300: Option<Vec<String>>,
    pub images150: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub image_rectangle: Option<Vec<String>>,
}

impl From<RawPlaylist> for PlaylistSummary {
    fn from(raw: RawPlaylist) -> Self {
        let image_url = [
            &raw.images300,
            &raw.images150,
            &raw.images,
            &raw.image_rectangle,
        ]
        .into_iter()
        .find_map(|imgs| imgs.as_ref().and_then(|v| v.first().cloned()));

        Self {
            id: raw.id.unwrap_or_default(),
            name: raw.name.unwrap_or_else(|| UNKNOWN_PLAYLIST.to_string()),
            tracks_count: raw.tracks_count.unwrap_or(0),
            description: raw.description.filter(|d| !d.is_empty()),
            image_url,
            owner_id: raw.owner.and_then(|o| o.id),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistSearchResponse {
    pub playlists: Option<Paged<RawPlaylist>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksResponse {
    pub tracks: Option<Paged<RawTrack>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserFavoritesResponse {
    pub tracks: Option<Paged<RawTrack>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginApiResponse {
    pub user: Option<RawUser>,
    pub user_auth_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: Option<String>,
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
