use qobuzfav::types::{
    LoginApiResponse, PlaylistSearchResponse, PlaylistSummary, ProgressUpdate, TrackSummary,
    TrackTableRow, UserFavoritesResponse,
};
use serde_json::json;

#[test]
fn tracks_accept_numeric_ids_and_fill_placeholders() {
    let response: UserFavoritesResponse = serde_json::from_value(json!({
        "tracks": {
            "total": 2,
            "items": [
                {
                    "id": 12345,
                    "title": "So What",
                    "duration": 545,
                    "performer": { "name": "Miles Davis" },
                    "album": { "title": "Kind of Blue" }
                },
                { "id": "678" }
            ]
        }
    }))
    .unwrap();

    let tracks: Vec<TrackSummary> = response
        .tracks
        .unwrap()
        .items
        .into_iter()
        .map(TrackSummary::from)
        .collect();

    assert_eq!(tracks[0].id, "12345");
    assert_eq!(tracks[0].artist, "Miles Davis");
    assert_eq!(tracks[0].album.as_deref(), Some("Kind of Blue"));
    assert_eq!(tracks[1].id, "678");
    assert_eq!(tracks[1].title, "Unknown Title");
    assert_eq!(tracks[1].artist, "Unknown Artist");
    assert_eq!(tracks[1].album.as_deref(), Some("Unknown Album"));
}

#[test]
fn playlist_image_prefers_largest_thumbnail() {
    let response: PlaylistSearchResponse = serde_json::from_value(json!({
        "playlists": {
            "items": [
                {
                    "id": 1,
                    "name": "Late Night",
                    "tracks_count": 12,
                    "owner": { "id": 42 },
                    "images150": ["small.jpg"],
                    "images300": ["large.jpg"]
                },
                {
                    "id": 2,
                    "image_rectangle": ["wide.jpg"],
                    "description": ""
                }
            ]
        }
    }))
    .unwrap();

    let playlists: Vec<PlaylistSummary> = response
        .playlists
        .unwrap()
        .items
        .into_iter()
        .map(PlaylistSummary::from)
        .collect();

    assert_eq!(playlists[0].image_url.as_deref(), Some("large.jpg"));
    assert_eq!(playlists[0].owner_id.as_deref(), Some("42"));
    assert_eq!(playlists[1].name, "Unknown Playlist");
    assert_eq!(playlists[1].tracks_count, 0);
    assert_eq!(playlists[1].image_url.as_deref(), Some("wide.jpg"));
    assert_eq!(playlists[1].description, None);
}

#[test]
fn login_response_reads_user_and_token() {
    let login: LoginApiResponse = serde_json::from_value(json!({
        "user": { "id": 987 },
        "user_auth_token": "token"
    }))
    .unwrap();

    assert_eq!(login.user.and_then(|u| u.id).as_deref(), Some("987"));
    assert_eq!(login.user_auth_token.as_deref(), Some("token"));
}

#[test]
fn progress_update_serializes_camel_case() {
    let update = ProgressUpdate {
        total_tracks: 4,
        processed_tracks: 4,
        successful_tracks: 3,
        failed_tracks: 1,
        current_status: "Import completed!".to_string(),
        is_completed: true,
        error_message: None,
    };

    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value["totalTracks"], 4);
    assert_eq!(value["successfulTracks"], 3);
    assert_eq!(value["isCompleted"], true);
    assert_eq!(value["currentStatus"], "Import completed!");
}

#[test]
fn table_row_formats_duration() {
    let track = TrackSummary {
        id: "1".to_string(),
        title: "So What".to_string(),
        artist: "Miles Davis".to_string(),
        album: None,
        duration: Some(545),
    };

    let row = TrackTableRow::from(&track);
    assert_eq!(row.duration, "9:05");
    assert_eq!(row.album, "");
}
