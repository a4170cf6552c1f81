//! # TheAudioDB Integration Module
//!
//! Read-only access to TheAudioDB's public JSON API, used to find candidate
//! tracks that the user can then commit into one of their playlists.
//!
//! ## Endpoints
//!
//! - `GET /searchtrack.php?s={artist}&t={title}` - exact track search
//! - `GET /searchalbum.php?s={artist}&a={title}` - album search, used as a
//!   fallback when the track search comes back empty
//! - `GET /track-top10.php?s={artist}` - an artist's top tracks
//!
//! Matches are returned under `track`, `album` or `loved` and come back as
//! `null` when nothing matched. Both track and album hits are normalized into
//! [`crate::types::TrackCandidate`].
//!
//! ## Failure Policy
//!
//! Lookups never fail from the caller's point of view. Transport errors,
//! non-success statuses, empty bodies and malformed JSON are reported with
//! `warning!` and produce an empty candidate list. There are no retries, no
//! caching and no timeouts beyond the `reqwest` defaults.

pub mod tracks;

pub use tracks::TrackLookupClient;

use thiserror::Error;

/// Why a remote lookup produced nothing. Only ever logged.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("empty response body")]
    EmptyBody,

    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}
