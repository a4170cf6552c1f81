pub mod accounts;
pub mod playlists;
pub mod session;
pub mod storage;

pub use accounts::AccountDirectory;
pub use playlists::PlaylistStore;
pub use session::{Access, Route, SessionGate};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageGateway};
