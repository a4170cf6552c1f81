use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use async_trait::async_trait;

use crate::{
    error::{PlaylistError, Result},
    types::{Account, Playlist, Session},
    warning,
};

pub const USERS_KEY: &str = "users";
pub const PLAYLISTS_KEY: &str = "playlists";
pub const SESSION_KEY: &str = "session_user";

/// String key/value storage with the semantics of browser `localStorage`:
/// whole values in, whole values out, a missing key reads as `None`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        match async_fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        // a reader sees either the old value or the new one, never a torn file
        let tmp = path.with_extension("json.tmp");
        async_fs::write(&tmp, value).await?;
        async_fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match async_fs::remove_dir_all(&self.dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store, lost when dropped.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // a poisoned map is still a consistent map of strings
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.items().clear();
        Ok(())
    }
}

/// Typed access to the persisted records.
///
/// `local` holds the account directory and the playlist collection and
/// survives across runs; `session` holds the active-session marker and is
/// wiped on logout. Every save rewrites the whole collection.
pub struct StorageGateway<S: KeyValueStore> {
    local: S,
    session: S,
}

impl StorageGateway<FileStore> {
    /// Opens `<root>/local` and `<root>/session`.
    pub fn open(root: &Path) -> Self {
        Self::new(
            FileStore::new(root.join("local")),
            FileStore::new(root.join("session")),
        )
    }
}

impl StorageGateway<MemoryStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryStore::new())
    }
}

impl<S: KeyValueStore> StorageGateway<S> {
    pub fn new(local: S, session: S) -> Self {
        Self { local, session }
    }

    /// Reads the account directory. A corrupt record is a `Serde` error, so
    /// callers that write the directory back never replace it.
    pub async fn load_accounts(&self) -> Result<Vec<Account>> {
        match self.local.get_item(USERS_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Read-only view of the account directory for lookups: a corrupt record
    /// reads as empty instead of failing.
    pub async fn load_accounts_lenient(&self) -> Result<Vec<Account>> {
        match self.load_accounts().await {
            Err(PlaylistError::Serde(e)) => {
                warning!("Account directory is unreadable, treating it as empty: {}", e);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    pub async fn save_accounts(&self, accounts: &[Account]) -> Result<()> {
        let json = serde_json::to_string_pretty(accounts)?;
        self.local.set_item(USERS_KEY, &json).await
    }

    pub async fn load_playlists(&self) -> Result<Vec<Playlist>> {
        match self.local.get_item(PLAYLISTS_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn save_playlists(&self, playlists: &[Playlist]) -> Result<()> {
        let json = serde_json::to_string_pretty(playlists)?;
        self.local.set_item(PLAYLISTS_KEY, &json).await
    }

    pub async fn load_session(&self) -> Result<Option<Session>> {
        match self.session.get_item(SESSION_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json).ok()),
            None => Ok(None),
        }
    }

    pub async fn save_session(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string_pretty(session)?;
        self.session.set_item(SESSION_KEY, &json).await
    }

    /// Drops everything in the session scope.
    pub async fn clear_session(&self) -> Result<()> {
        self.session.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Track;

    fn playlist(owner: &str, name: &str) -> Playlist {
        Playlist {
            id: crate::utils::generate_id(),
            name: name.to_string(),
            owner_id: owner.to_string(),
            tracks: vec![Track {
                id: "t1".to_string(),
                name: "Song".to_string(),
                artist: "Band".to_string(),
                genre: "Rock".to_string(),
                year: Some(1999),
            }],
        }
    }

    #[tokio::test]
    async fn missing_keys_read_as_empty() {
        let storage = StorageGateway::in_memory();
        assert!(storage.load_accounts().await.unwrap().is_empty());
        assert!(storage.load_playlists().await.unwrap().is_empty());
        assert!(storage.load_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn playlists_are_rewritten_whole() {
        let storage = StorageGateway::in_memory();
        let first = vec![playlist("a", "One"), playlist("b", "Two")];
        storage.save_playlists(&first).await.unwrap();
        assert_eq!(storage.load_playlists().await.unwrap(), first);

        let second = vec![playlist("a", "Three")];
        storage.save_playlists(&second).await.unwrap();
        assert_eq!(storage.load_playlists().await.unwrap(), second);
    }

    #[tokio::test]
    async fn corrupt_account_directory_only_reads_as_empty_when_lenient() {
        let storage = StorageGateway::new(MemoryStore::new(), MemoryStore::new());
        storage.local.set_item(USERS_KEY, "{not json").await.unwrap();
        assert!(matches!(
            storage.load_accounts().await,
            Err(PlaylistError::Serde(_))
        ));
        assert!(storage.load_accounts_lenient().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn file_store_replaces_values_without_leftovers() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("local"));

        store.set_item(PLAYLISTS_KEY, "[1]").await.unwrap();
        store.set_item(PLAYLISTS_KEY, "[2]").await.unwrap();

        assert_eq!(
            store.get_item(PLAYLISTS_KEY).await.unwrap().as_deref(),
            Some("[2]")
        );
        let names: Vec<String> = std::fs::read_dir(dir.path().join("local"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["playlists.json".to_string()]);
    }

    #[tokio::test]
    async fn file_store_clear_removes_every_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("session"));
        store.set_item(SESSION_KEY, "{}").await.unwrap();

        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert!(store.get_item(SESSION_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_playlist_collection_is_an_error() {
        let storage = StorageGateway::new(MemoryStore::new(), MemoryStore::new());
        storage.local.set_item(PLAYLISTS_KEY, "[{").await.unwrap();
        assert!(storage.load_playlists().await.is_err());
    }

    #[tokio::test]
    async fn clearing_the_session_keeps_local_data() {
        let storage = StorageGateway::in_memory();
        let account = Account {
            id: "id-1".to_string(),
            email: "user@x.com".to_string(),
            password_hash: "hash".to_string(),
        };
        storage.save_accounts(&[account.clone()]).await.unwrap();
        storage
            .save_session(&Session::for_account(&account))
            .await
            .unwrap();

        storage.clear_session().await.unwrap();

        assert!(storage.load_session().await.unwrap().is_none());
        assert_eq!(storage.load_accounts().await.unwrap(), vec![account]);
    }
}
