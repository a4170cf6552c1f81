use crate::{
    management::Route,
    success,
    types::{NewTrack, TrackUpdate},
    warning,
};

use super::{Context, report};

pub async fn add_track(playlist_id: String, track: NewTrack) {
    let mut ctx = Context::open();
    let Some(session) = ctx.enter(Route::Playlist(playlist_id.clone())).await else {
        return;
    };

    match ctx
        .playlists
        .add_track(&session.account_id, &playlist_id, track)
        .await
    {
        Ok(track) => success!("Added {} by {} ({})", track.name, track.artist, track.id),
        Err(e) => report(e),
    }
}

pub async fn update_track(playlist_id: String, track_id: String, update: TrackUpdate) {
    if update.is_empty() {
        warning!("Nothing to update. Pass at least one of --name, --artist, --genre, --year.");
        return;
    }

    let mut ctx = Context::open();
    let Some(session) = ctx.enter(Route::Playlist(playlist_id.clone())).await else {
        return;
    };

    match ctx
        .playlists
        .update_track(&session.account_id, &playlist_id, &track_id, update)
        .await
    {
        Ok(track) => success!("Updated {} by {}", track.name, track.artist),
        Err(e) => report(e),
    }
}

pub async fn remove_track(playlist_id: String, track_id: String) {
    let mut ctx = Context::open();
    let Some(session) = ctx.enter(Route::Playlist(playlist_id.clone())).await else {
        return;
    };

    match ctx
        .playlists
        .remove_track(&session.account_id, &playlist_id, &track_id)
        .await
    {
        Ok(()) => success!("Track {} removed", track_id),
        Err(e) => report(e),
    }
}
