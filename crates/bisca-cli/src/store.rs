use bisca_core::game::{GameSnapshot, SNAPSHOT_KEY, SnapshotStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Snapshot store backed by one JSON file, `<dir>/biscaGameState.json`.
/// Writes go through a temporary file and a rename so a crash never leaves a
/// half-written snapshot behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SNAPSHOT_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Io(format!("{action} {}: {err}", path.display()))
}

impl SnapshotStore for FileStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|err| io_error("creating", dir, err))?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|err| io_error("writing", &staging, err))?;
        fs::rename(&staging, &self.path).map_err(|err| io_error("replacing", &self.path, err))
    }

    fn load(&mut self) -> Result<Option<GameSnapshot>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(GameSnapshot::from_json(&json)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error("reading", &self.path, err)),
        }
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error("removing", &self.path, err)),
        }
    }
}
