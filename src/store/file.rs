use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{model, model::data::SessionData, Encryptor, SessionStore};

/// Keeps the session in a single JSON file so it survives between runs.
/// Encrypted when an [`Encryptor`] is given.
pub struct FileSessionStore {
    path: PathBuf,
    encryptor: Option<Box<dyn Encryptor + Send + Sync>>,
}

impl FileSessionStore {
    pub fn new(path: &Path, encryptor: Option<Box<dyn Encryptor + Send + Sync>>) -> Self {
        tracing::debug!(path = %path.display(), encrypted = encryptor.is_some(), "file session store");
        FileSessionStore {
            path: path.to_path_buf(),
            encryptor,
        }
    }

    fn encode(&self, data: &SessionData) -> Result<String, model::store::Error> {
        let serialized = serde_json::to_string(data)
            .map_err(|e| anyhow::anyhow!("Serialization error: {:?}", e))?;
        Ok(match &self.encryptor {
            Some(encryptor) => encryptor.encrypt(&serialized),
            None => serialized,
        })
    }

    fn decode(&self, content: &str) -> Result<SessionData, model::store::Error> {
        let serialized = match &self.encryptor {
            Some(encryptor) => encryptor
                .decrypt(content)
                .map_err(|e| model::store::Error::Corrupted(e.to_string()))?,
            None => content.to_string(),
        };
        serde_json::from_str(&serialized).map_err(|e| model::store::Error::Corrupted(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn add(&self, data: SessionData) -> Result<(), model::store::Error> {
        tracing::debug!(path = %self.path.display(), "saving session");
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| anyhow::anyhow!("can't create {}: {}", dir.display(), e))?;
        }
        let content = self.encode(&data)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| anyhow::anyhow!("can't write {}: {}", self.path.display(), e))?;
        Ok(())
    }

    async fn get(&self) -> Result<SessionData, model::store::Error> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Err(model::store::Error::NoSession()),
            Ok(content) => self.decode(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(model::store::Error::NoSession()),
            Err(e) => Err(anyhow::anyhow!("can't read {}: {}", self.path.display(), e).into()),
        }
    }

    async fn remove(&self) -> Result<(), model::store::Error> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(model::store::Error::NoSession()),
            Err(e) => Err(anyhow::anyhow!("can't remove {}: {}", self.path.display(), e).into()),
        }
    }
}
