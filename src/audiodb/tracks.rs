use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config,
    types::{
        AlbumSearchResponse, AudioDbAlbum, AudioDbTrack, TopTracksResponse, TrackCandidate,
        TrackSearchResponse,
    },
    warning,
};

use super::LookupError;

const UNKNOWN_GENRE: &str = "Unknown";
const UNKNOWN_YEAR: &str = "-";

/// Read-only client for TheAudioDB track and album lookups.
///
/// Each query is attempted once. Any failure along the way (transport,
/// status, empty or malformed body) is logged and turned into an empty
/// result, so callers only ever see a list of candidates.
#[derive(Debug, Clone)]
pub struct TrackLookupClient {
    http: Client,
    base_url: String,
    limit: usize,
}

impl Default for TrackLookupClient {
    fn default() -> Self {
        Self::new(config::audiodb_api_url())
    }
}

impl TrackLookupClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limit: config::LOOKUP_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Searches for `title` by `artist`.
    ///
    /// Tries an exact track search first. When that yields nothing, falls
    /// back to an album search and presents each album as a track-shaped
    /// candidate named after the album.
    pub async fn search_by_artist_and_title(&self, artist: &str, title: &str) -> Vec<TrackCandidate> {
        match self
            .fetch::<TrackSearchResponse>("searchtrack.php", &[("s", artist), ("t", title)])
            .await
        {
            Ok(res) => {
                let tracks = res.track.unwrap_or_default();
                if !tracks.is_empty() {
                    return tracks
                        .into_iter()
                        .take(self.limit)
                        .enumerate()
                        .map(|(i, t)| track_candidate(t, i, artist))
                        .collect();
                }
            }
            Err(e) => warning!("Track search for {} - {} failed: {}", artist, title, e),
        }

        match self
            .fetch::<AlbumSearchResponse>("searchalbum.php", &[("s", artist), ("a", title)])
            .await
        {
            Ok(res) => res
                .album
                .unwrap_or_default()
                .into_iter()
                .take(self.limit)
                .enumerate()
                .map(|(i, a)| album_candidate(a, i, artist))
                .collect(),
            Err(e) => {
                warning!("Album search for {} - {} failed: {}", artist, title, e);
                Vec::new()
            }
        }
    }

    /// Fetches the artist's top tracks, falling back to the `loved` list when
    /// the response carries no `track` list.
    pub async fn top_tracks_for_artist(&self, artist: &str) -> Vec<TrackCandidate> {
        match self
            .fetch::<TopTracksResponse>("track-top10.php", &[("s", artist)])
            .await
        {
            Ok(res) => res
                .track
                .or(res.loved)
                .unwrap_or_default()
                .into_iter()
                .take(self.limit)
                .enumerate()
                .map(|(i, t)| track_candidate(t, i, artist))
                .collect(),
            Err(e) => {
                warning!("Top tracks lookup for {} failed: {}", artist, e);
                Vec::new()
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T, LookupError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(LookupError::EmptyBody);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn track_candidate(track: AudioDbTrack, index: usize, artist: &str) -> TrackCandidate {
    TrackCandidate {
        id: non_empty(track.id_track).unwrap_or_else(|| format!("track-{index}")),
        name: track.str_track.unwrap_or_default(),
        artist: non_empty(track.str_artist).unwrap_or_else(|| artist.to_string()),
        genre: non_empty(track.str_genre)
            .or_else(|| non_empty(track.str_style))
            .unwrap_or_else(|| UNKNOWN_GENRE.to_string()),
        year: non_empty(track.int_year_released).unwrap_or_else(|| UNKNOWN_YEAR.to_string()),
        thumb: track.str_track_thumb.unwrap_or_default(),
    }
}

fn album_candidate(album: AudioDbAlbum, index: usize, artist: &str) -> TrackCandidate {
    TrackCandidate {
        id: non_empty(album.id_album).unwrap_or_else(|| format!("album-{index}")),
        name: album.str_album.unwrap_or_default(),
        artist: non_empty(album.str_artist).unwrap_or_else(|| artist.to_string()),
        genre: non_empty(album.str_genre)
            .or_else(|| non_empty(album.str_style))
            .unwrap_or_else(|| UNKNOWN_GENRE.to_string()),
        year: non_empty(album.int_year_released)
            .or_else(|| non_empty(album.int_year))
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string()),
        thumb: album.str_album_thumb.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_hits_fall_back_field_by_field() {
        let album = AudioDbAlbum {
            id_album: None,
            str_album: Some("Dummy".to_string()),
            str_artist: None,
            str_genre: Some(String::new()),
            str_style: Some("Trip Hop".to_string()),
            int_year_released: None,
            int_year: Some("1994".to_string()),
            str_album_thumb: None,
        };

        let candidate = album_candidate(album, 3, "Portishead");

        assert_eq!(candidate.id, "album-3");
        assert_eq!(candidate.name, "Dummy");
        assert_eq!(candidate.artist, "Portishead");
        assert_eq!(candidate.genre, "Trip Hop");
        assert_eq!(candidate.year, "1994");
        assert_eq!(candidate.thumb, "");
    }

    #[test]
    fn track_hits_without_genre_are_unknown() {
        let track = AudioDbTrack {
            id_track: Some("32793500".to_string()),
            str_track: Some("Roads".to_string()),
            str_artist: Some("Portishead".to_string()),
            ..AudioDbTrack::default()
        };

        let candidate = track_candidate(track, 0, "portishead");

        assert_eq!(candidate.id, "32793500");
        assert_eq!(candidate.artist, "Portishead");
        assert_eq!(candidate.genre, UNKNOWN_GENRE);
        assert_eq!(candidate.year, UNKNOWN_YEAR);
    }
}
