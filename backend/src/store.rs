use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use history_core::{History, HistoryError, HistoryRecord, UserId};
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("history file io: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    History(#[from] HistoryError),
}

#[derive(Clone, Default)]
pub struct HistoryStore {
    history: Arc<RwLock<History>>,
    persist_path: Option<PathBuf>,
}

impl HistoryStore {
    pub async fn with_persistence(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let history = match tokio::fs::read(&path).await {
            Ok(bytes) => History::from_slice(&bytes)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => History::new(),
            Err(err) => return Err(err.into()),
        };
        info!(path = %path.display(), users = history.len(), "history loaded");

        Ok(Self {
            history: Arc::new(RwLock::new(history)),
            persist_path: Some(path),
        })
    }

    pub fn persist_path(&self) -> Option<&Path> {
        self.persist_path.as_deref()
    }

    pub async fn add(
        &self,
        user: impl Into<UserId>,
        record: HistoryRecord,
    ) -> Result<(), StoreError> {
        let user = user.into();
        // held until the file is replaced
        let mut history = self.history.write().await;
        history.append(user.clone(), record);
        debug!(%user, records = history.records(&user).map_or(0, <[_]>::len), "history appended");
        self.write_file(&history).await
    }

    pub async fn save(&self) -> Result<(), StoreError> {
        let history = self.history.write().await;
        self.write_file(&history).await
    }

    pub async fn records(&self, user: &str) -> Option<Vec<HistoryRecord>> {
        let history = self.history.read().await;
        history.records(user).map(<[_]>::to_vec)
    }

    pub async fn snapshot(&self) -> History {
        self.history.read().await.clone()
    }

    async fn write_file(&self, history: &History) -> Result<(), StoreError> {
        let Some(path) = &self.persist_path else {
            return Ok(());
        };
        let json = history.to_vec()?;
        atomic_write(path, &json).await?;
        Ok(())
    }
}

async fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let tmp_path = path.with_extension(format!("tmp.{}", std::process::id()));
    tokio::fs::write(&tmp_path, content).await?;
    if let Err(err) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(err);
    }
    Ok(())
}
