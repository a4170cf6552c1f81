//! # CLI Module
//!
//! Command-line front end for the playlist manager. Each command stands in for
//! one screen of a browser playlist app: login and register forms, the home
//! list of playlists, the playlist detail page and the track search panel.
//!
//! ## Command Categories
//!
//! ### Account
//!
//! - [`register`] - Creates an account and logs it in
//! - [`login`] - Starts a session for an existing account
//! - [`logout`] - Ends the session
//! - [`whoami`] - Shows the active session
//!
//! ### Playlists (protected)
//!
//! - [`list_playlists`], [`create_playlist`], [`rename_playlist`],
//!   [`delete_playlist`], [`show_playlist`]
//!
//! ### Tracks (protected)
//!
//! - [`add_track`], [`update_track`], [`remove_track`]
//!
//! ### Navigation
//!
//! - [`open`] - Enters a view by path (`/home`, `/playlists/<id>`, `/login`,
//!   `/register`), going through the same route check as the commands above
//!
//! ### Lookup
//!
//! - [`search`] - Track search with album fallback on TheAudioDB
//! - [`top`] - An artist's top tracks
//!
//! Both lookups can commit a picked candidate into a playlist, which makes
//! them protected when `--add-to` is given.
//!
//! ## Access Control
//!
//! Protected commands ask the [`SessionGate`] for the route they stand in for.
//! A redirect is reported as a hint to log in; the session that comes back
//! from a granted check is what every store call is scoped to.
//!
//! ## Error Reporting
//!
//! Rejected operations (duplicate email, bad credentials, a playlist that is
//! not yours) are reported with `warning!` and the command ends normally.
//! Storage failures are fatal and reported with `error!`.

mod auth;
mod lookup;
mod playlist;
mod tracks;

pub use auth::login;
pub use auth::logout;
pub use auth::register;
pub use auth::whoami;
pub use lookup::search;
pub use lookup::top;
pub use playlist::create_playlist;
pub use playlist::delete_playlist;
pub use playlist::list_playlists;
pub use playlist::open;
pub use playlist::rename_playlist;
pub use playlist::show_playlist;
pub use tracks::add_track;
pub use tracks::remove_track;
pub use tracks::update_track;

use std::sync::Arc;

use crate::{
    config, error,
    error::PlaylistError,
    management::{
        Access, AccountDirectory, FileStore, PlaylistStore, Route, SessionGate, StorageGateway,
    },
    types::Session,
    warning,
};

/// The stores a command works with, all backed by the same storage.
pub struct Context {
    pub directory: AccountDirectory<FileStore>,
    pub gate: SessionGate<FileStore>,
    pub playlists: PlaylistStore<FileStore>,
}

impl Context {
    pub fn open() -> Self {
        let storage = Arc::new(StorageGateway::open(&config::data_dir()));
        Self {
            directory: AccountDirectory::new(Arc::clone(&storage)),
            gate: SessionGate::new(Arc::clone(&storage)),
            playlists: PlaylistStore::new(storage),
        }
    }

    /// Checks `route` with the session gate and loads the caller's playlists.
    /// Returns `None` after telling the user to log in.
    pub async fn enter(&mut self, route: Route) -> Option<Session> {
        match self.gate.guard(&route).await {
            Ok(Access::Granted(Some(session))) => {
                match self.directory.exists(&session.account_id).await {
                    Ok(true) => {}
                    Ok(false) => {
                        warning!("The logged in account no longer exists. Log in again.");
                        return None;
                    }
                    Err(e) => error!("Failed to read accounts: {}", e),
                }
                if let Err(e) = self.playlists.load(&session.account_id).await {
                    error!("Failed to load playlists: {}", e);
                }
                Some(session)
            }
            Ok(Access::Granted(None)) | Ok(Access::Redirect(_)) => {
                warning!("You are not logged in. Run playlistcli login first.");
                None
            }
            Err(e) => error!("Failed to read session: {}", e),
        }
    }
}

/// Reports a store error: rejections as warnings, storage failures as fatal.
pub(crate) fn report(err: PlaylistError) {
    match err {
        PlaylistError::Io(_) | PlaylistError::Serde(_) | PlaylistError::Hash(_) => {
            error!("{}", err)
        }
        other => warning!("{}", other),
    }
}
