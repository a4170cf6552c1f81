use std::sync::Arc;

use crate::{
    error::{PlaylistError, Result},
    management::storage::{KeyValueStore, StorageGateway},
    types::{NewTrack, Playlist, Track, TrackUpdate},
    utils,
};

/// Owns the working set of playlists for one account.
///
/// Every operation is scoped to the acting account id. A playlist the account
/// does not own behaves exactly like one that does not exist: the call fails
/// with `NotFound` and nothing is written. Mutations rewrite the whole
/// persisted collection and then refresh the working set.
pub struct PlaylistStore<S: KeyValueStore> {
    storage: Arc<StorageGateway<S>>,
    playlists: Vec<Playlist>,
}

impl<S: KeyValueStore> PlaylistStore<S> {
    pub fn new(storage: Arc<StorageGateway<S>>) -> Self {
        Self {
            storage,
            playlists: Vec::new(),
        }
    }

    /// Replaces the working set with the playlists owned by `account_id`, in
    /// stored order.
    pub async fn load(&mut self, account_id: &str) -> Result<Vec<Playlist>> {
        let all = self.storage.load_playlists().await?;
        self.playlists = owned_by(all, account_id);
        Ok(self.playlists.clone())
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn clear(&mut self) {
        self.playlists.clear();
    }

    pub async fn get(&self, account_id: &str, playlist_id: &str) -> Result<Playlist> {
        self.storage
            .load_playlists()
            .await?
            .into_iter()
            .find(|p| p.id == playlist_id && p.owner_id == account_id)
            .ok_or_else(|| not_found_playlist(playlist_id))
    }

    pub async fn create(&mut self, account_id: &str, name: &str) -> Result<Playlist> {
        let name = playlist_name(name)?;
        let mut all = self.owner_checked_collection(account_id).await?;

        let playlist = Playlist {
            id: utils::generate_id(),
            name,
            owner_id: account_id.to_string(),
            tracks: Vec::new(),
        };
        all.push(playlist.clone());

        self.persist(account_id, all).await?;
        Ok(playlist)
    }

    pub async fn rename(&mut self, account_id: &str, playlist_id: &str, new_name: &str) -> Result<()> {
        let new_name = playlist_name(new_name)?;
        let mut all = self.owner_checked_collection(account_id).await?;

        let playlist = find_owned(&mut all, account_id, playlist_id)?;
        playlist.name = new_name;

        self.persist(account_id, all).await
    }

    pub async fn delete(&mut self, account_id: &str, playlist_id: &str) -> Result<()> {
        let mut all = self.owner_checked_collection(account_id).await?;

        let before = all.len();
        all.retain(|p| !(p.id == playlist_id && p.owner_id == account_id));
        if all.len() == before {
            return Err(not_found_playlist(playlist_id));
        }

        self.persist(account_id, all).await
    }

    pub async fn add_track(
        &mut self,
        account_id: &str,
        playlist_id: &str,
        fields: NewTrack,
    ) -> Result<Track> {
        let name = fields.name.trim().to_string();
        if name.is_empty() {
            return Err(PlaylistError::InvalidInput("track name is empty".to_string()));
        }

        let mut all = self.owner_checked_collection(account_id).await?;
        let playlist = find_owned(&mut all, account_id, playlist_id)?;

        let track = Track {
            id: utils::generate_id(),
            name,
            artist: fields.artist.trim().to_string(),
            genre: fields.genre.trim().to_string(),
            year: fields.year,
        };
        playlist.tracks.push(track.clone());

        self.persist(account_id, all).await?;
        Ok(track)
    }

    /// Merges the fields set in `update` into the stored track.
    pub async fn update_track(
        &mut self,
        account_id: &str,
        playlist_id: &str,
        track_id: &str,
        update: TrackUpdate,
    ) -> Result<Track> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(PlaylistError::InvalidInput("track name is empty".to_string()));
            }
        }

        let mut all = self.owner_checked_collection(account_id).await?;
        let playlist = find_owned(&mut all, account_id, playlist_id)?;
        let track = playlist
            .tracks
            .iter_mut()
            .find(|t| t.id == track_id)
            .ok_or_else(|| not_found_track(track_id))?;

        if let Some(name) = update.name {
            track.name = name.trim().to_string();
        }
        if let Some(artist) = update.artist {
            track.artist = artist.trim().to_string();
        }
        if let Some(genre) = update.genre {
            track.genre = genre.trim().to_string();
        }
        if let Some(year) = update.year {
            track.year = Some(year);
        }
        let updated = track.clone();

        self.persist(account_id, all).await?;
        Ok(updated)
    }

    pub async fn remove_track(&mut self, account_id: &str, playlist_id: &str, track_id: &str) -> Result<()> {
        let mut all = self.owner_checked_collection(account_id).await?;
        let playlist = find_owned(&mut all, account_id, playlist_id)?;

        let before = playlist.tracks.len();
        playlist.tracks.retain(|t| t.id != track_id);
        if playlist.tracks.len() == before {
            return Err(not_found_track(track_id));
        }

        self.persist(account_id, all).await
    }

    /// Loads the full collection after confirming `account_id` still names a
    /// registered account.
    async fn owner_checked_collection(&self, account_id: &str) -> Result<Vec<Playlist>> {
        let accounts = self.storage.load_accounts().await?;
        if !accounts.iter().any(|a| a.id == account_id) {
            return Err(PlaylistError::NotFound(format!("account {account_id}")));
        }
        self.storage.load_playlists().await
    }

    async fn persist(&mut self, account_id: &str, all: Vec<Playlist>) -> Result<()> {
        self.storage.save_playlists(&all).await?;
        self.playlists = owned_by(all, account_id);
        Ok(())
    }
}

fn owned_by(all: Vec<Playlist>, account_id: &str) -> Vec<Playlist> {
    all.into_iter().filter(|p| p.owner_id == account_id).collect()
}

fn find_owned<'a>(all: &'a mut [Playlist], account_id: &str, playlist_id: &str) -> Result<&'a mut Playlist> {
    all.iter_mut()
        .find(|p| p.id == playlist_id && p.owner_id == account_id)
        .ok_or_else(|| not_found_playlist(playlist_id))
}

fn playlist_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlaylistError::InvalidInput("playlist name is empty".to_string()));
    }
    Ok(name.to_string())
}

fn not_found_playlist(playlist_id: &str) -> PlaylistError {
    PlaylistError::NotFound(format!("playlist {playlist_id}"))
}

fn not_found_track(track_id: &str) -> PlaylistError {
    PlaylistError::NotFound(format!("track {track_id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{management::storage::MemoryStore, types::Account};

    async fn setup(emails: &[&str]) -> (PlaylistStore<MemoryStore>, Vec<String>) {
        let storage = Arc::new(StorageGateway::in_memory());
        let accounts: Vec<Account> = emails
            .iter()
            .map(|email| Account {
                id: utils::generate_id(),
                email: email.to_string(),
                password_hash: "unused".to_string(),
            })
            .collect();
        storage.save_accounts(&accounts).await.unwrap();
        let ids = accounts.into_iter().map(|a| a.id).collect();
        (PlaylistStore::new(storage), ids)
    }

    fn song(name: &str) -> NewTrack {
        NewTrack {
            name: name.to_string(),
            artist: "Band".to_string(),
            genre: "Rock".to_string(),
            year: Some(2001),
        }
    }

    #[tokio::test]
    async fn create_then_load_returns_one_empty_playlist() {
        let (mut store, ids) = setup(&["a@x.com"]).await;
        store.create(&ids[0], "Road Trip").await.unwrap();

        let loaded = store.load(&ids[0]).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Road Trip");
        assert!(loaded[0].tracks.is_empty());
    }

    #[tokio::test]
    async fn load_without_data_is_empty() {
        let (mut store, ids) = setup(&["a@x.com"]).await;
        assert!(store.load(&ids[0]).await.unwrap().is_empty());
        assert!(store.load("never-registered").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_returns_only_own_playlists_in_order() {
        let (mut store, ids) = setup(&["a@x.com", "b@x.com"]).await;
        store.create(&ids[0], "First").await.unwrap();
        store.create(&ids[1], "Theirs").await.unwrap();
        store.create(&ids[0], "Second").await.unwrap();

        let names: Vec<String> = store
            .load(&ids[0])
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(store.playlists().len(), 2);
    }

    #[tokio::test]
    async fn names_are_trimmed_and_must_not_be_empty() {
        let (mut store, ids) = setup(&["a@x.com"]).await;
        let playlist = store.create(&ids[0], "  Chill  ").await.unwrap();
        assert_eq!(playlist.name, "Chill");
        assert!(matches!(
            store.create(&ids[0], "   ").await,
            Err(PlaylistError::InvalidInput(_))
        ));
        assert!(matches!(
            store.rename(&ids[0], &playlist.id, "").await,
            Err(PlaylistError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn unknown_account_cannot_create() {
        let (mut store, _) = setup(&["a@x.com"]).await;
        assert!(matches!(
            store.create("ghost", "Nope").await,
            Err(PlaylistError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn rename_and_delete_own_playlist() {
        let (mut store, ids) = setup(&["a@x.com"]).await;
        let playlist = store.create(&ids[0], "Old").await.unwrap();

        store.rename(&ids[0], &playlist.id, "New").await.unwrap();
        assert_eq!(store.get(&ids[0], &playlist.id).await.unwrap().name, "New");
        assert_eq!(store.playlists()[0].name, "New");

        store.delete(&ids[0], &playlist.id).await.unwrap();
        assert!(store.load(&ids[0]).await.unwrap().is_empty());
        assert!(matches!(
            store.delete(&ids[0], &playlist.id).await,
            Err(PlaylistError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn foreign_account_cannot_touch_playlist() {
        let (mut store, ids) = setup(&["a@x.com", "b@x.com"]).await;
        let (owner, intruder) = (&ids[0], &ids[1]);
        let playlist = store.create(owner, "Mine").await.unwrap();
        let track = store.add_track(owner, &playlist.id, song("One")).await.unwrap();
        let snapshot = store.get(owner, &playlist.id).await.unwrap();

        assert!(matches!(
            store.rename(intruder, &playlist.id, "Stolen").await,
            Err(PlaylistError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(intruder, &playlist.id).await,
            Err(PlaylistError::NotFound(_))
        ));
        assert!(matches!(
            store.add_track(intruder, &playlist.id, song("Two")).await,
            Err(PlaylistError::NotFound(_))
        ));
        assert!(matches!(
            store
                .update_track(intruder, &playlist.id, &track.id, TrackUpdate::default())
                .await,
            Err(PlaylistError::NotFound(_))
        ));
        assert!(matches!(
            store.remove_track(intruder, &playlist.id, &track.id).await,
            Err(PlaylistError::NotFound(_))
        ));
        assert!(matches!(
            store.get(intruder, &playlist.id).await,
            Err(PlaylistError::NotFound(_))
        ));

        assert_eq!(store.get(owner, &playlist.id).await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn add_then_remove_track_leaves_playlist_empty() {
        let (mut store, ids) = setup(&["a@x.com"]).await;
        let playlist = store.create(&ids[0], "Mix").await.unwrap();
        let track = store.add_track(&ids[0], &playlist.id, song("One")).await.unwrap();

        store.remove_track(&ids[0], &playlist.id, &track.id).await.unwrap();
        assert!(store.get(&ids[0], &playlist.id).await.unwrap().tracks.is_empty());
    }

    #[tokio::test]
    async fn removing_unknown_track_leaves_list_unchanged() {
        let (mut store, ids) = setup(&["a@x.com"]).await;
        let playlist = store.create(&ids[0], "Mix").await.unwrap();
        store.add_track(&ids[0], &playlist.id, song("One")).await.unwrap();

        let result = store.remove_track(&ids[0], &playlist.id, "missing").await;

        assert!(matches!(result, Err(PlaylistError::NotFound(_))));
        assert_eq!(store.get(&ids[0], &playlist.id).await.unwrap().tracks.len(), 1);
    }

    #[tokio::test]
    async fn track_ids_are_unique_under_rapid_adds() {
        let (mut store, ids) = setup(&["a@x.com"]).await;
        let playlist = store.create(&ids[0], "Mix").await.unwrap();
        let mut seen = std::collections::HashSet::new();
        for i in 0..20 {
            let track = store
                .add_track(&ids[0], &playlist.id, song(&format!("Song {i}")))
                .await
                .unwrap();
            assert!(seen.insert(track.id));
        }
    }

    #[tokio::test]
    async fn update_track_merges_given_fields() {
        let (mut store, ids) = setup(&["a@x.com"]).await;
        let playlist = store.create(&ids[0], "Mix").await.unwrap();
        let track = store.add_track(&ids[0], &playlist.id, song("One")).await.unwrap();

        let updated = store
            .update_track(
                &ids[0],
                &playlist.id,
                &track.id,
                TrackUpdate {
                    genre: Some("Jazz".to_string()),
                    year: Some(1959),
                    ..TrackUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, track.id);
        assert_eq!(updated.name, "One");
        assert_eq!(updated.artist, "Band");
        assert_eq!(updated.genre, "Jazz");
        assert_eq!(updated.year, Some(1959));
        assert_eq!(
            store.get(&ids[0], &playlist.id).await.unwrap().tracks,
            vec![updated]
        );
    }

    #[tokio::test]
    async fn update_unknown_track_is_not_found() {
        let (mut store, ids) = setup(&["a@x.com"]).await;
        let playlist = store.create(&ids[0], "Mix").await.unwrap();
        assert!(matches!(
            store
                .update_track(&ids[0], &playlist.id, "missing", TrackUpdate::default())
                .await,
            Err(PlaylistError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn empty_track_name_is_rejected() {
        let (mut store, ids) = setup(&["a@x.com"]).await;
        let playlist = store.create(&ids[0], "Mix").await.unwrap();
        assert!(matches!(
            store.add_track(&ids[0], &playlist.id, song("  ")).await,
            Err(PlaylistError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn clear_empties_working_set_only() {
        let (mut store, ids) = setup(&["a@x.com"]).await;
        store.create(&ids[0], "Keep").await.unwrap();
        store.clear();
        assert!(store.playlists().is_empty());
        assert_eq!(store.load(&ids[0]).await.unwrap().len(), 1);
    }
}
