mod common;

use std::{collections::HashSet, sync::Arc, time::Duration};

use common::{
    FAVORITES, FakeQobuz, assert_well_formed, drain, ids, numbered_tracks, progress_channel,
    session_for, track,
};
use qobuzfav::pipeline::{
    self, Mutation, Pacing, ProgressReporter, collect_track_ids, run_batches,
};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn import_deduplicates_tracks_across_playlists() {
    let fake = Arc::new(
        FakeQobuz::default()
            .with_playlist(
                "P1",
                vec![
                    track("A", "Alpha", "One", None),
                    track("B", "Beta", "Two", None),
                    track("C", "Gamma", "Three", None),
                ],
            )
            .with_playlist(
                "P2",
                vec![
                    track("B", "Beta", "Two", None),
                    track("D", "Delta", "Four", None),
                ],
            ),
    );
    let session = session_for(&fake);
    let (tx, mut rx) = progress_channel();

    pipeline::run_import(&session, &ids(&["P1", "P2"]), &tx, &Pacing::default()).await;

    assert_eq!(fake.add_calls(), vec![ids(&["A", "B", "C", "D"])]);

    let updates = drain(&mut rx);
    let last = assert_well_formed(&updates);
    assert_eq!(last.total_tracks, 4);
    assert_eq!(last.processed_tracks, 4);
    assert_eq!(last.successful_tracks, 4);
    assert_eq!(last.failed_tracks, 0);
    assert_eq!(last.current_status, "Import completed!");
    assert_eq!(last.error_message, None);

    let statuses: Vec<&str> = updates.iter().map(|u| u.current_status.as_str()).collect();
    assert_eq!(statuses[0], "Starting import process...");
    assert!(statuses.contains(&"Loading tracks from playlist 1/2..."));
    assert!(statuses.contains(&"Loading tracks from playlist 2/2..."));
    assert!(statuses.contains(&"Adding 4 tracks to favorites..."));
    assert!(statuses.contains(&"Processing batch 1/1..."));
    assert!(statuses.contains(&"Batch 1/1 completed"));
}

#[tokio::test(start_paused = true)]
async fn import_waits_between_playlists_only() {
    let fake = Arc::new(
        FakeQobuz::default()
            .with_playlist("P1", numbered_tracks("a", 3))
            .with_playlist("P2", numbered_tracks("b", 3)),
    );
    let session = session_for(&fake);
    let (tx, _rx) = progress_channel();

    let started = Instant::now();
    pipeline::run_import(&session, &ids(&["P1", "P2"]), &tx, &Pacing::default()).await;

    assert_eq!(started.elapsed(), Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn import_without_playlists_completes_with_message() {
    let fake = Arc::new(FakeQobuz::default());
    let session = session_for(&fake);
    let (tx, mut rx) = progress_channel();

    pipeline::run_import(&session, &[], &tx, &Pacing::default()).await;

    let updates = drain(&mut rx);
    assert_eq!(updates.len(), 1);
    let last = assert_well_formed(&updates);
    assert_eq!(last.total_tracks, 0);
    assert_eq!(last.error_message.as_deref(), Some("No playlists were selected"));
    assert!(fake.add_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn import_of_empty_playlists_never_mutates() {
    let fake = Arc::new(
        FakeQobuz::default()
            .with_playlist("P1", Vec::new())
            .with_playlist("P2", vec![track("", "No id", "Nobody", None)]),
    );
    let session = session_for(&fake);
    let (tx, mut rx) = progress_channel();

    pipeline::run_import(&session, &ids(&["P1", "P2"]), &tx, &Pacing::default()).await;

    let last = assert_well_formed(&drain(&mut rx));
    assert_eq!(last.current_status, "No tracks found to import");
    assert_eq!(
        last.error_message.as_deref(),
        Some("No tracks were found in the selected playlists")
    );
    assert!(fake.add_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn import_skips_unknown_playlists() {
    let fake = Arc::new(FakeQobuz::default().with_playlist("P1", numbered_tracks("a", 2)));
    let session = session_for(&fake);
    let (tx, mut rx) = progress_channel();

    pipeline::run_import(&session, &ids(&["missing", "P1"]), &tx, &Pacing::default()).await;

    assert_eq!(fake.add_calls(), vec![ids(&["a0", "a1"])]);
    let last = assert_well_formed(&drain(&mut rx));
    assert_eq!(last.successful_tracks, 2);
}

#[tokio::test(start_paused = true)]
async fn failed_batch_falls_back_to_single_calls() {
    let mut fake = FakeQobuz::default().with_playlist(
        "P1",
        ["A", "B", "C", "X", "Y", "Z", "G", "H", "I"]
            .iter()
            .map(|id| track(id, id, "Artist", None))
            .collect(),
    );
    fake.batch_poison.insert("X".to_string());
    fake.single_failures.insert("Y".to_string());
    let fake = Arc::new(fake);
    let session = session_for(&fake);
    let (tx, mut rx) = progress_channel();
    let pacing = Pacing {
        batch_size: 3,
        ..Pacing::default()
    };

    let started = Instant::now();
    pipeline::run_import(&session, &ids(&["P1"]), &tx, &pacing).await;

    assert_eq!(
        fake.add_calls(),
        vec![
            ids(&["A", "B", "C"]),
            ids(&["X", "Y", "Z"]),
            ids(&["X"]),
            ids(&["Y"]),
            ids(&["Z"]),
            ids(&["G", "H", "I"]),
        ]
    );
    // two batch gaps plus two gaps between the three single calls
    assert_eq!(started.elapsed(), Duration::from_millis(5000));

    let updates = drain(&mut rx);
    let last = assert_well_formed(&updates);
    assert_eq!(last.processed_tracks, 9);
    assert_eq!(last.successful_tracks, 8);
    assert_eq!(last.failed_tracks, 1);

    let after_second = updates
        .iter()
        .find(|u| u.current_status == "Batch 2/3 completed")
        .cloned()
        .unwrap();
    assert_eq!(after_second.successful_tracks, 5);
    assert_eq!(after_second.failed_tracks, 1);
}

#[tokio::test(start_paused = true)]
async fn unacknowledged_batch_fails_without_fallback() {
    let fake = Arc::new(FakeQobuz {
        unacknowledged: true,
        ..FakeQobuz::default()
    });
    let (tx, mut rx) = progress_channel();
    let track_ids = ids(&["A", "B", "C"]);

    let mut progress = ProgressReporter::new(&tx);
    let outcome = run_batches(
        &*fake,
        &track_ids,
        Mutation::Add,
        &Pacing::default(),
        &mut progress,
    )
    .await;

    assert_eq!(outcome.processed, 3);
    assert_eq!(outcome.successful, 0);
    assert_eq!(outcome.failed, 3);
    assert_eq!(fake.add_calls().len(), 1);

    let last = assert_well_formed(&drain(&mut rx));
    assert_eq!(last.failed_tracks, 3);
}

#[tokio::test(start_paused = true)]
async fn delete_all_runs_in_paced_batches() {
    let fake = Arc::new(FakeQobuz::default().with_favorites(numbered_tracks("t", 120)));
    let session = session_for(&fake);
    let (tx, mut rx) = progress_channel();

    let started = Instant::now();
    pipeline::run_delete_all(&session, &tx, &Pacing::default()).await;
    let elapsed = started.elapsed();

    let batch_sizes: Vec<usize> = fake.remove_calls().iter().map(Vec::len).collect();
    assert_eq!(batch_sizes, vec![50, 50, 20]);
    assert!(fake.favorites.lock().unwrap().is_empty());

    // two page gaps while listing, two batch gaps while deleting
    assert_eq!(elapsed, Duration::from_millis(2 * 500 + 2 * 2000));

    let updates = drain(&mut rx);
    let last = assert_well_formed(&updates);
    assert_eq!(last.total_tracks, 120);
    assert_eq!(last.processed_tracks, 120);
    assert_eq!(last.successful_tracks, 120);
    assert_eq!(last.current_status, "Delete completed!");
    assert_eq!(updates[0].current_status, "Loading current favorites...");
    assert!(
        updates
            .iter()
            .any(|u| u.current_status == "Deleting batch 3/3...")
    );
}

#[tokio::test(start_paused = true)]
async fn delete_all_without_favorites_completes_with_message() {
    let fake = Arc::new(FakeQobuz::default());
    let session = session_for(&fake);
    let (tx, mut rx) = progress_channel();

    pipeline::run_delete_all(&session, &tx, &Pacing::default()).await;

    let last = assert_well_formed(&drain(&mut rx));
    assert_eq!(last.current_status, "No favorites found to delete");
    assert_eq!(
        last.error_message.as_deref(),
        Some("There are no favorites to delete")
    );
    assert!(fake.remove_calls().is_empty());
}

fn jazz_favorites() -> Vec<qobuzfav::types::TrackSummary> {
    vec![
        track("1", "So What", "Miles Davis", Some("Kind of Blue")),
        track("2", "Giant Steps", "John Coltrane", Some("Giant Steps")),
        track("3", "Blue in Green", "Bill Evans", Some("Miles Ahead Sessions")),
        track("4", "Take Five", "Dave Brubeck", None),
    ]
}

#[tokio::test(start_paused = true)]
async fn preview_counts_matches_on_any_field() {
    let fake = Arc::new(FakeQobuz::default().with_favorites(jazz_favorites()));
    let session = session_for(&fake);

    let preview = pipeline::preview_filtered(&session, Some("miles"), &Pacing::default()).await;

    assert_eq!(preview.total_count, 2);
    let sample_ids: Vec<&str> = preview.sample_tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(sample_ids, vec!["1", "3"]);
    assert!(fake.remove_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn preview_sample_is_capped() {
    let fake = Arc::new(FakeQobuz::default().with_favorites(numbered_tracks("t", 12)));
    let session = session_for(&fake);

    let preview = pipeline::preview_filtered(&session, None, &Pacing::default()).await;

    assert_eq!(preview.total_count, 12);
    assert_eq!(preview.sample_tracks.len(), pipeline::PREVIEW_SAMPLE_SIZE);
}

#[tokio::test(start_paused = true)]
async fn delete_filtered_removes_only_matches() {
    let fake = Arc::new(FakeQobuz::default().with_favorites(jazz_favorites()));
    let session = session_for(&fake);
    let (tx, mut rx) = progress_channel();

    pipeline::run_delete_filtered(&session, Some("MILES"), &tx, &Pacing::default()).await;

    assert_eq!(fake.remove_calls(), vec![ids(&["1", "3"])]);
    let remaining: Vec<String> = fake
        .favorites
        .lock()
        .unwrap()
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(remaining, ids(&["2", "4"]));

    let last = assert_well_formed(&drain(&mut rx));
    assert_eq!(last.successful_tracks, 2);
}

#[tokio::test(start_paused = true)]
async fn delete_filtered_without_matches_never_mutates() {
    let fake = Arc::new(FakeQobuz::default().with_favorites(jazz_favorites()));
    let session = session_for(&fake);
    let (tx, mut rx) = progress_channel();

    pipeline::run_delete_filtered(&session, Some("zzz"), &tx, &Pacing::default()).await;

    let updates = drain(&mut rx);
    assert_eq!(updates[0].current_status, "Loading and filtering favorites...");
    let last = assert_well_formed(&updates);
    assert_eq!(last.total_tracks, 0);
    assert_eq!(last.processed_tracks, 0);
    assert_eq!(last.error_message.as_deref(), Some("No favorites match \"zzz\""));
    assert!(fake.remove_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn search_favorites_returns_requested_window() {
    let fake = Arc::new(FakeQobuz::default().with_favorites(numbered_tracks("t", 7)));
    let session = session_for(&fake);
    let pacing = Pacing::default();

    let first = pipeline::search_favorites(&session, Some("song"), 3, 0, &pacing).await;
    assert_eq!(first.total_count, 7);
    assert_eq!(first.tracks.len(), 3);
    assert!(first.has_more);

    let last = pipeline::search_favorites(&session, Some("song"), 3, 6, &pacing).await;
    assert_eq!(last.tracks.len(), 1);
    assert_eq!(last.tracks[0].id, "t6");
    assert!(!last.has_more);
}

#[tokio::test(start_paused = true)]
async fn listing_stops_at_failed_page() {
    let mut fake = FakeQobuz::default().with_favorites(numbered_tracks("t", 120));
    fake.broken_pages.insert((FAVORITES.to_string(), 50));
    let fake = Arc::new(fake);
    let session = session_for(&fake);

    let favorites = pipeline::list_favorites(&session, &Pacing::default()).await;

    assert_eq!(favorites.len(), 50);
    assert_eq!(fake.page_calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn listing_stops_at_short_page() {
    let fake = Arc::new(FakeQobuz::default().with_playlist("P1", numbered_tracks("t", 100)));
    let session = session_for(&fake);

    let tracks = pipeline::get_playlist_tracks(&session, "P1", &Pacing::default()).await;

    assert_eq!(tracks.len(), 100);
    // 50, 50, then an empty page ends the walk
    let offsets: Vec<usize> = fake.page_calls().iter().map(|(_, _, o)| *o).collect();
    assert_eq!(offsets, vec![0, 50, 100]);
}

#[tokio::test(start_paused = true)]
async fn walk_pages_keeps_items_before_an_error() {
    let pacing = Pacing {
        page_size: 2,
        ..Pacing::default()
    };

    let items = pipeline::walk_pages(&pacing, "numbers", |offset, limit| async move {
        if offset >= 4 {
            Err(common::upstream_error())
        } else {
            Ok((offset..offset + limit).collect::<Vec<usize>>())
        }
    })
    .await;

    assert_eq!(items, vec![0, 1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn collected_ids_are_unique_and_bounded() {
    let fake = Arc::new(
        FakeQobuz::default()
            .with_playlist("P1", numbered_tracks("t", 30))
            .with_playlist("P2", numbered_tracks("t", 45))
            .with_playlist("P3", numbered_tracks("u", 5)),
    );
    let session = session_for(&fake);
    let (tx, _rx) = progress_channel();
    let mut progress = ProgressReporter::new(&tx);

    let track_ids = collect_track_ids(
        &session,
        &ids(&["P1", "P2", "P3"]),
        &Pacing::default(),
        &mut progress,
    )
    .await;

    let unique: HashSet<&String> = track_ids.iter().collect();
    assert_eq!(unique.len(), track_ids.len());
    assert!(track_ids.len() <= 30 + 45 + 5);
    assert_eq!(track_ids.len(), 50);
    assert_eq!(track_ids[0], "t0");
    assert_eq!(track_ids[45], "u0");
    assert!(!progress.is_completed());
}

#[tokio::test(start_paused = true)]
async fn playlist_search_can_prioritize_own_playlists() {
    let playlist = |id: &str, owner: &str| qobuzfav::types::PlaylistSummary {
        id: id.to_string(),
        name: format!("Playlist {}", id),
        tracks_count: 10,
        description: None,
        image_url: None,
        owner_id: Some(owner.to_string()),
    };
    let fake = Arc::new(FakeQobuz {
        search_results: vec![
            playlist("1", "someone"),
            playlist("2", common::USER_ID),
            playlist("3", "someone"),
            playlist("4", common::USER_ID),
        ],
        ..FakeQobuz::default()
    });
    let session = session_for(&fake);

    let prioritized = pipeline::search_playlists(&session, "jazz", 20, true).await;
    let order: Vec<&str> = prioritized.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(order, vec!["2", "4", "1", "3"]);

    let plain = pipeline::search_playlists(&session, "jazz", 20, false).await;
    let order: Vec<&str> = plain.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(order, vec!["1", "2", "3", "4"]);
}

#[tokio::test(start_paused = true)]
async fn failed_playlist_search_is_empty() {
    let fake = Arc::new(FakeQobuz {
        search_fails: true,
        ..FakeQobuz::default()
    });
    let session = session_for(&fake);

    assert!(pipeline::search_playlists(&session, "jazz", 20, true).await.is_empty());
}

#[tokio::test]
async fn reporter_ignores_updates_after_completion() {
    let (tx, mut rx) = progress_channel();
    let mut progress = ProgressReporter::new(&tx);

    progress.total(3, "Working").await;
    progress.record(2, 1, "Step").await;
    progress.complete("Done", None).await;
    progress.record(5, 5, "Late").await;
    progress.complete("Done again", Some("late".to_string())).await;

    let updates = drain(&mut rx);
    assert_eq!(updates.len(), 3);
    let last = assert_well_formed(&updates);
    assert_eq!(last.current_status, "Done");
    assert_eq!(last.processed_tracks, 3);
    assert_eq!(last.error_message, None);
}

#[tokio::test(start_paused = true)]
async fn delete_skips_favorites_without_id() {
    let mut favorites = numbered_tracks("t", 2);
    favorites.insert(1, track("", "Ghost", "Nobody", None));
    let fake = Arc::new(FakeQobuz::default().with_favorites(favorites));
    let session = session_for(&fake);
    let (tx, mut rx) = progress_channel();

    pipeline::run_delete_all(&session, &tx, &Pacing::default()).await;

    assert_eq!(fake.remove_calls(), vec![ids(&["t0", "t1"])]);
    let last = assert_well_formed(&drain(&mut rx));
    assert_eq!(last.total_tracks, 2);
    assert_eq!(last.successful_tracks, 2);
}

#[tokio::test(start_paused = true)]
async fn delete_filtered_of_only_idless_matches_never_mutates() {
    let fake = Arc::new(
        FakeQobuz::default().with_favorites(vec![track("", "Ghost", "Nobody", None)]),
    );
    let session = session_for(&fake);
    let (tx, mut rx) = progress_channel();

    pipeline::run_delete_filtered(&session, Some("ghost"), &tx, &Pacing::default()).await;

    assert!(fake.remove_calls().is_empty());
    let last = assert_well_formed(&drain(&mut rx));
    assert_eq!(last.error_message.as_deref(), Some("No favorites match \"ghost\""));
}
