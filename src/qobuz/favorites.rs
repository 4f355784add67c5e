use crate::{
    Res,
    qobuz::QobuzClient,
    types::{StatusResponse, TrackSummary, UserFavoritesResponse},
};

/// Fetches one page of the user's favorite tracks via `favorite/getUserFavorites`.
///
/// # Arguments
///
/// * `client` - Authenticated client of the session user
/// * `user_id` - Qobuz user id whose favorites are listed
/// * `limit` - Page size
/// * `offset` - Index of the first favorite of the page
///
/// # Returns
///
/// Up to `limit` favorite tracks in the order Qobuz keeps them. Missing
/// titles, artists and albums are replaced by placeholders.
///
/// # Errors
///
/// Returns [`crate::Error::Http`] or [`crate::Error::Api`] when the page
/// cannot be fetched.
pub async fn get_page(
    client: &QobuzClient,
    user_id: &str,
    limit: usize,
    offset: usize,
) -> Res<Vec<TrackSummary>> {
    let response: UserFavoritesResponse = client
        .get_json(
            "favorite/getUserFavorites",
            &[
                ("user_id", user_id.to_string()),
                ("type", "tracks".to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ],
        )
        .await?;

    Ok(response
        .tracks
        .map(|t| t.items.into_iter().map(TrackSummary::from).collect())
        .unwrap_or_default())
}

/// Adds tracks to favorites via `favorite/create`.
///
/// All ids go out in one request as a comma separated `track_ids` list.
///
/// # Returns
///
/// `Ok(true)` when Qobuz answers `{"status":"success"}`, `Ok(false)` for any
/// other well-formed answer.
pub async fn create(client: &QobuzClient, track_ids: &[String]) -> Res<bool> {
    mutate(client, "favorite/create", track_ids).await
}

/// Removes tracks from favorites via `favorite/delete`.
///
/// Same request shape and result semantics as [`create`].
pub async fn delete(client: &QobuzClient, track_ids: &[String]) -> Res<bool> {
    mutate(client, "favorite/delete", track_ids).await
}

async fn mutate(client: &QobuzClient, endpoint: &str, track_ids: &[String]) -> Res<bool> {
    let response: StatusResponse = client
        .get_json(endpoint, &[("track_ids", track_ids.join(","))])
        .await?;

    Ok(response.status.as_deref() == Some("success"))
}
