//! Configuration management for playlistcli.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Unlike credentials for an authenticated
//! API, every setting here has a usable default, so none of the accessors
//! panic when a variable is missing.
//!
//! Lookup order:
//! 1. Environment variables
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, path::PathBuf};

/// Public TheAudioDB v1 endpoint using the shared test key.
pub const DEFAULT_AUDIODB_API_URL: &str = "https://www.theaudiodb.com/api/v1/json/2";

/// Maximum number of candidates a lookup returns.
pub const LOOKUP_LIMIT: usize = 10;

/// Loads environment variables from `playlistcli/.env` in the local data
/// directory.
///
/// The directory is created if needed. A missing `.env` file is not an error;
/// a file that exists but cannot be parsed is.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/playlistcli/.env`
/// - macOS: `~/Library/Application Support/playlistcli/.env`
/// - Windows: `%LOCALAPPDATA%/playlistcli/.env`
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlistcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the root directory for persisted state.
///
/// `PLAYLISTCLI_DATA_DIR` wins when set; otherwise `playlistcli` under the
/// platform's local data directory.
pub fn data_dir() -> PathBuf {
    match env::var("PLAYLISTCLI_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("playlistcli");
            path
        }
    }
}

/// Returns the TheAudioDB base URL (`AUDIODB_API_URL`), without a trailing
/// slash.
pub fn audiodb_api_url() -> String {
    env::var("AUDIODB_API_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AUDIODB_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Returns the bcrypt cost for new password hashes (`PLAYLISTCLI_HASH_COST`).
///
/// Values outside bcrypt's accepted range fall back to the library default.
pub fn hash_cost() -> u32 {
    env::var("PLAYLISTCLI_HASH_COST")
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|cost| (4..=31).contains(cost))
        .unwrap_or(bcrypt::DEFAULT_COST)
}
