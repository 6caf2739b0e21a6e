//! File-based Session Store Adapter
//!
//! Stores each game session as a YAML snapshot on disk, one file per
//! session id under the configured data directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::foundation::SessionId;
use crate::domain::game::GameSession;
use crate::ports::{SessionStore, StoreError};

/// File-based storage for game sessions
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created on first save.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the store
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn session_file_path(&self, id: &SessionId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", id))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, session: &GameSession) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_path).await?;

        let yaml = serde_yaml::to_string(session)?;

        // Snapshot is written beside the target and renamed into place.
        let path = self.session_file_path(session.id());
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, yaml).await?;
        if let Err(err) = fs::rename(&tmp, &path).await {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                warn!(path = %tmp.display(), error = %cleanup, "Failed to remove snapshot tmp file");
            }
            return Err(err.into());
        }

        debug!(session = %session.id(), path = %path.display(), "Session snapshot written");
        Ok(())
    }

    async fn load(&self, id: &SessionId) -> Result<Option<GameSession>, StoreError> {
        let path = self.session_file_path(id);
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&path).await?;
        let session = serde_yaml::from_str(&yaml)?;
        Ok(Some(session))
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, StoreError> {
        Ok(fs::try_exists(self.session_file_path(id)).await?)
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        let path = self.session_file_path(id);
        if !fs::try_exists(&path).await? {
            return Err(StoreError::NotFound(*id));
        }
        fs::remove_file(&path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quiz::QuestionCatalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn session() -> GameSession {
        GameSession::new(SessionId::new(), "Alex", "Sam").unwrap()
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("sessions"));
        let catalog = QuestionCatalog::bundled().unwrap();
        let mut session = session();
        session
            .deal_round_one(&catalog, &mut StdRng::seed_from_u64(1))
            .unwrap();

        store.save(&session).await.unwrap();
        let loaded = store.load(session.id()).await.unwrap();

        assert_eq!(loaded, Some(session));
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path());
        assert!(store.load(&SessionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_existing_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path());
        let mut session = session();
        store.save(&session).await.unwrap();

        session.unlock_round_two();
        store.save(&session).await.unwrap();

        let loaded = store.load(session.id()).await.unwrap().unwrap();
        assert!(loaded.is_round_two_unlocked());
    }

    #[tokio::test]
    async fn exists_and_delete() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path());
        let session = session();

        assert!(!store.exists(session.id()).await.unwrap());
        store.save(&session).await.unwrap();
        assert!(store.exists(session.id()).await.unwrap());

        store.delete(session.id()).await.unwrap();
        assert!(!store.exists(session.id()).await.unwrap());
        assert!(matches!(
            store.delete(session.id()).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path());
        let id = SessionId::new();
        std::fs::write(dir.path().join(format!("{}.yaml", id)), "phase: [not, valid").unwrap();

        assert!(matches!(
            store.load(&id).await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn failed_rename_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path());
        let session = session();

        // A non-empty directory at the target path makes the rename fail.
        let target = store.session_file_path(session.id());
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();

        assert!(matches!(store.save(&session).await, Err(StoreError::Io(_))));
        assert!(!target.with_extension("yaml.tmp").exists());
        assert!(target.join("keep").exists());
    }
}
