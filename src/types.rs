use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password_hash: String,
}

/// The record of which account is active.
///
/// Its presence in session storage is the only authentication signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub account_id: String,
    pub email: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn for_account(account: &Account) -> Self {
        Self {
            account_id: account.id.clone(),
            email: account.email.clone(),
            logged_in_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub genre: String,
    pub year: Option<i32>,
}

/// Track fields as entered by the user, before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrack {
    pub name: String,
    pub artist: String,
    pub genre: String,
    pub year: Option<i32>,
}

/// Partial track fields; `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackUpdate {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

impl TrackUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.artist.is_none() && self.genre.is_none() && self.year.is_none()
    }
}

/// A lookup result normalized to one track-like shape, whether the remote
/// hit was a track or an album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCandidate {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub genre: String,
    pub year: String,
    pub thumb: String,
}

impl From<TrackCandidate> for NewTrack {
    fn from(candidate: TrackCandidate) -> Self {
        NewTrack {
            name: candidate.name,
            artist: candidate.artist,
            genre: candidate.genre,
            year: utils::parse_year(&candidate.year),
        }
    }
}

// TheAudioDB response bodies. Every field is optional on the wire and lists
// come back as `null` when nothing matched.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioDbTrack {
    #[serde(rename = "idTrack")]
    pub id_track: Option<String>,
    #[serde(rename = "strTrack")]
    pub str_track: Option<String>,
    #[serde(rename = "strArtist")]
    pub str_artist: Option<String>,
    #[serde(rename = "strGenre")]
    pub str_genre: Option<String>,
    #[serde(rename = "strStyle")]
    pub str_style: Option<String>,
    #[serde(rename = "intYearReleased")]
    pub int_year_released: Option<String>,
    #[serde(rename = "strTrackThumb")]
    pub str_track_thumb: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioDbAlbum {
    #[serde(rename = "idAlbum")]
    pub id_album: Option<String>,
    #[serde(rename = "strAlbum")]
    pub str_album: Option<String>,
    #[serde(rename = "strArtist")]
    pub str_artist: Option<String>,
    #[serde(rename = "strGenre")]
    pub str_genre: Option<String>,
    #[serde(rename = "strStyle")]
    pub str_style: Option<String>,
    #[serde(rename = "intYearReleased")]
    pub int_year_released: Option<String>,
    #[serde(rename = "intYear")]
    pub int_year: Option<String>,
    #[serde(rename = "strAlbumThumb")]
    pub str_album_thumb: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackSearchResponse {
    pub track: Option<Vec<AudioDbTrack>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumSearchResponse {
    pub album: Option<Vec<AudioDbAlbum>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopTracksResponse {
    pub track: Option<Vec<AudioDbTrack>>,
    pub loved: Option<Vec<AudioDbTrack>>,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub tracks: usize,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub genre: String,
    pub year: String,
}

#[derive(Tabled)]
pub struct CandidateTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    pub artist: String,
    pub genre: String,
    pub year: String,
}
