use std::{future::Future, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    audiodb::TrackLookupClient,
    info,
    management::Route,
    success,
    types::{NewTrack, TrackCandidate},
    utils, warning,
};

use super::{Context, report};

/// Where a looked-up candidate should go: `(playlist id, 1-based pick)`.
pub type Commit = Option<(String, usize)>;

pub async fn search(artist: String, title: String, commit: Commit) {
    let client = TrackLookupClient::default();
    let candidates = with_spinner(
        format!("Searching TheAudioDB for {title} by {artist}..."),
        client.search_by_artist_and_title(&artist, &title),
    )
    .await;

    present(candidates, commit).await;
}

pub async fn top(artist: String, commit: Commit) {
    let client = TrackLookupClient::default();
    let candidates = with_spinner(
        format!("Fetching top tracks for {artist}..."),
        client.top_tracks_for_artist(&artist),
    )
    .await;

    present(candidates, commit).await;
}

async fn with_spinner<F: Future<Output = Vec<TrackCandidate>>>(message: String, lookup: F) -> Vec<TrackCandidate> {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let candidates = lookup.await;
    pb.finish_and_clear();
    candidates
}

async fn present(candidates: Vec<TrackCandidate>, commit: Commit) {
    if candidates.is_empty() {
        info!("No results");
        return;
    }

    println!("{}", Table::new(utils::candidate_rows(&candidates)));

    let Some((playlist_id, pick)) = commit else {
        return;
    };

    let Some(candidate) = pick.checked_sub(1).and_then(|i| candidates.get(i)).cloned() else {
        warning!("Pick must be between 1 and {}", candidates.len());
        return;
    };

    let mut ctx = Context::open();
    let Some(session) = ctx.enter(Route::Playlist(playlist_id.clone())).await else {
        return;
    };

    match ctx
        .playlists
        .add_track(&session.account_id, &playlist_id, NewTrack::from(candidate))
        .await
    {
        Ok(track) => success!("Added {} by {} to the playlist", track.name, track.artist),
        Err(e) => report(e),
    }
}
