//! Playlist Manager Library
//!
//! Local accounts, per-account playlists and TheAudioDB track lookup. State is
//! persisted as JSON under the local data directory; the active login lives in
//! a separate session scope that is wiped on logout.
//!
//! # Modules
//!
//! - `audiodb` - TheAudioDB client used to find candidate tracks
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy for account and playlist operations
//! - `management` - Storage gateway, account directory, session gate and playlist store
//! - `types` - Data structures and type definitions
//! - `utils` - Validation and formatting helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use playlistcli::management::{AccountDirectory, PlaylistStore, SessionGate, StorageGateway};
//!
//! #[tokio::main]
//! async fn main() -> playlistcli::Res<()> {
//!     let storage = Arc::new(StorageGateway::in_memory());
//!     let directory = AccountDirectory::new(Arc::clone(&storage));
//!     let gate = SessionGate::new(Arc::clone(&storage));
//!     let mut playlists = PlaylistStore::new(storage);
//!
//!     let session = gate.register(&directory, "user@x.com", "secret").await?;
//!     playlists.create(&session.account_id, "Road Trip").await?;
//!     Ok(())
//! }
//! ```

pub mod audiodb;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod types;
pub mod utils;

/// A convenient Result type alias for the command-line layer.
///
/// Library operations return [`error::Result`]; the CLI and `main` fold
/// those and configuration errors into this boxed form.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loading playlists for {}", email);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist {} created", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for failures the command cannot recover from. Code after this macro
/// does not run.
///
/// # Example
///
/// ```
/// error!("Cannot open data directory: {}", e);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: rejected input, a lookup that came back
/// empty because the remote failed, an unreadable record.
///
/// # Example
///
/// ```
/// warning!("Top tracks lookup for {} failed: {}", artist, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
