use super::serialization::GameSnapshot;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Key the snapshot blob is stored under.
pub const SNAPSHOT_KEY: &str = "biscaGameState";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Io(String),
    Encoding(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(detail) => write!(f, "storage I/O failed: {detail}"),
            StoreError::Encoding(detail) => write!(f, "snapshot encoding failed: {detail}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Encoding(err.to_string())
    }
}

/// Persistence capability: one snapshot under [`SNAPSHOT_KEY`].
pub trait SnapshotStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), StoreError>;
    fn load(&mut self) -> Result<Option<GameSnapshot>, StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-process key-value store of JSON blobs. Clones share the same map, so a
/// test can keep a handle after boxing one into the game.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<String> {
        self.blobs.borrow().get(SNAPSHOT_KEY).cloned()
    }

    pub fn put_raw(&self, blob: impl Into<String>) {
        self.blobs
            .borrow_mut()
            .insert(SNAPSHOT_KEY.to_string(), blob.into());
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        let blob = serde_json::to_string(snapshot)?;
        self.put_raw(blob);
        Ok(())
    }

    fn load(&mut self) -> Result<Option<GameSnapshot>, StoreError> {
        match self.raw() {
            Some(blob) => Ok(Some(GameSnapshot::from_json(&blob)?)),
            None => Ok(None),
        }
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.blobs.borrow_mut().remove(SNAPSHOT_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::GameState;

    #[test]
    fn clones_share_the_same_blob() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer
            .save(&GameSnapshot::capture(&GameState::login()))
            .unwrap();
        assert!(store.raw().is_some_and(|blob| blob.contains("\"login\"")));

        writer.clear().unwrap();
        assert!(store.raw().is_none());
    }

    #[test]
    fn corrupted_blob_surfaces_encoding_error() {
        let mut store = MemoryStore::new();
        store.put_raw("not json");
        assert!(matches!(store.load(), Err(StoreError::Encoding(_))));
    }
}
