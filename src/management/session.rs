use std::sync::Arc;

use crate::{
    error::{PlaylistError, Result},
    management::{
        accounts::AccountDirectory,
        playlists::PlaylistStore,
        storage::{KeyValueStore, StorageGateway},
    },
    types::Session,
};

/// Views of the application a caller may ask to enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Playlist(String),
}

impl Route {
    /// Maps a path to a route. The root and anything unknown land on the
    /// login entry point.
    pub fn parse(path: &str) -> Self {
        let path = path.trim().trim_end_matches('/');
        match path {
            "/register" => Route::Register,
            "/home" => Route::Home,
            _ => match path.strip_prefix("/playlists/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Playlist(id.to_string()),
                _ => Route::Login,
            },
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Home | Route::Playlist(_))
    }
}

/// Outcome of a route check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// The caller may render the route; protected routes carry the session.
    Granted(Option<Session>),
    Redirect(Route),
}

/// Tracks who is logged in.
///
/// The persisted session record is the only authentication signal: present
/// means Authenticated, absent means Anonymous.
pub struct SessionGate<S: KeyValueStore> {
    storage: Arc<StorageGateway<S>>,
}

impl<S: KeyValueStore> SessionGate<S> {
    pub fn new(storage: Arc<StorageGateway<S>>) -> Self {
        Self { storage }
    }

    /// Registers a new account and makes it the active session.
    pub async fn register(
        &self,
        directory: &AccountDirectory<S>,
        email: &str,
        password: &str,
    ) -> Result<Session> {
        let account = directory.register(email, password).await?;
        let session = Session::for_account(&account);
        self.storage.save_session(&session).await?;
        Ok(session)
    }

    pub async fn login(
        &self,
        directory: &AccountDirectory<S>,
        email: &str,
        password: &str,
    ) -> Result<Session> {
        let account = directory.authenticate(email, password).await?;
        let session = Session::for_account(&account);
        self.storage.save_session(&session).await?;
        Ok(session)
    }

    pub async fn current(&self) -> Result<Option<Session>> {
        self.storage.load_session().await
    }

    pub async fn require(&self) -> Result<Session> {
        self.current().await?.ok_or(PlaylistError::Unauthenticated)
    }

    /// Ends `session` and drops the playlist working set cached for it.
    ///
    /// Fails with `Unauthenticated` and leaves everything in place when
    /// `session` is not the active one.
    pub async fn logout(&self, session: &Session, playlists: &mut PlaylistStore<S>) -> Result<()> {
        match self.current().await? {
            Some(active) if active.account_id == session.account_id => {}
            _ => return Err(PlaylistError::Unauthenticated),
        }

        self.storage.clear_session().await?;
        playlists.clear();
        Ok(())
    }

    pub async fn guard(&self, route: &Route) -> Result<Access> {
        if !route.is_protected() {
            return Ok(Access::Granted(None));
        }

        Ok(match self.current().await? {
            Some(session) => Access::Granted(Some(session)),
            None => Access::Redirect(Route::Login),
        })
    }
}
