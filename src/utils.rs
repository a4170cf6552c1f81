use uuid::Uuid;

use crate::types::{
    CandidateTableRow, Playlist, PlaylistTableRow, Track, TrackCandidate, TrackTableRow,
};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Checks the `local@domain.tld` shape: no whitespace, exactly one `@`, and
/// some dot in the domain with something on both sides of it. A trailing dot
/// is fine as long as another dot satisfies that (`user@example.com.`).
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let mut inner = domain.chars();
    inner.next();
    inner.next_back();
    inner.as_str().contains('.')
}

pub fn is_valid_password(password: &str) -> bool {
    password.trim().chars().count() >= MIN_PASSWORD_LEN
}

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parses a release year as TheAudioDB reports it. Placeholders such as `—`
/// or `0` mean the year is unknown.
pub fn parse_year(text: &str) -> Option<i32> {
    match text.trim().parse::<i32>() {
        Ok(year) if year > 0 => Some(year),
        _ => None,
    }
}

pub fn playlist_rows(playlists: &[Playlist]) -> Vec<PlaylistTableRow> {
    playlists
        .iter()
        .map(|p| PlaylistTableRow {
            id: p.id.clone(),
            name: p.name.clone(),
            tracks: p.tracks.len(),
        })
        .collect()
}

pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            id: t.id.clone(),
            name: t.name.clone(),
            artist: t.artist.clone(),
            genre: t.genre.clone(),
            year: t.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

pub fn candidate_rows(candidates: &[TrackCandidate]) -> Vec<CandidateTableRow> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| CandidateTableRow {
            index: i + 1,
            name: c.name.clone(),
            artist: c.artist.clone(),
            genre: c.genre.clone(),
            year: c.year.clone(),
        })
        .collect()
}
