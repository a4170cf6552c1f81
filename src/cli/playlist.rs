use tabled::Table;

use crate::{info, management::Route, success, utils};

use super::{Context, report};

pub async fn list_playlists() {
    let mut ctx = Context::open();
    let Some(session) = ctx.enter(Route::Home).await else {
        return;
    };

    let playlists = ctx.playlists.playlists();
    if playlists.is_empty() {
        info!("{} has no playlists yet", session.email);
        return;
    }

    println!("{}", Table::new(utils::playlist_rows(playlists)));
}

pub async fn create_playlist(name: String) {
    let mut ctx = Context::open();
    let Some(session) = ctx.enter(Route::Home).await else {
        return;
    };

    match ctx.playlists.create(&session.account_id, &name).await {
        Ok(playlist) => success!("Playlist {} created ({})", playlist.name, playlist.id),
        Err(e) => report(e),
    }
}

pub async fn rename_playlist(playlist_id: String, name: String) {
    let mut ctx = Context::open();
    let Some(session) = ctx.enter(Route::Playlist(playlist_id.clone())).await else {
        return;
    };

    match ctx
        .playlists
        .rename(&session.account_id, &playlist_id, &name)
        .await
    {
        Ok(()) => success!("Playlist renamed to {}", name.trim()),
        Err(e) => report(e),
    }
}

pub async fn delete_playlist(playlist_id: String) {
    let mut ctx = Context::open();
    let Some(session) = ctx.enter(Route::Playlist(playlist_id.clone())).await else {
        return;
    };

    match ctx.playlists.delete(&session.account_id, &playlist_id).await {
        Ok(()) => success!("Playlist {} deleted", playlist_id),
        Err(e) => report(e),
    }
}

pub async fn show_playlist(playlist_id: String) {
    let mut ctx = Context::open();
    let Some(session) = ctx.enter(Route::Playlist(playlist_id.clone())).await else {
        return;
    };

    let playlist = match ctx.playlists.get(&session.account_id, &playlist_id).await {
        Ok(playlist) => playlist,
        Err(e) => return report(e),
    };

    info!("{} ({} tracks)", playlist.name, playlist.tracks.len());
    if !playlist.tracks.is_empty() {
        println!("{}", Table::new(utils::track_rows(&playlist.tracks)));
    }
}

pub async fn open(path: String) {
    match Route::parse(&path) {
        Route::Home => list_playlists().await,
        Route::Playlist(id) => show_playlist(id).await,
        Route::Login => {
            info!("Log in with: playlistcli login --email <EMAIL> --password <PASSWORD>")
        }
        Route::Register => {
            info!("Sign up with: playlistcli register --email <EMAIL> --password <PASSWORD>")
        }
    }
}
