use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::{model, model::data::SessionData, SessionStore};

pub struct InMemorySessionStore {
    store: Arc<Mutex<Option<SessionData>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        InMemorySessionStore {
            store: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn add(&self, data: SessionData) -> Result<(), model::store::Error> {
        tracing::debug!("Adding session");
        let mut store = self
            .store
            .lock()
            .map_err(|e| anyhow::anyhow!("Locking error: {:?}", e))?;
        if store.replace(data).is_some() {
            tracing::debug!("replaced previous session");
        }
        Ok(())
    }

    async fn get(&self) -> Result<SessionData, model::store::Error> {
        let store = self
            .store
            .lock()
            .map_err(|e| anyhow::anyhow!("Locking error: {:?}", e))?;
        match store.as_ref() {
            Some(data) => Ok(data.clone()),
            None => Err(model::store::Error::NoSession()),
        }
    }

    async fn remove(&self) -> Result<(), model::store::Error> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| anyhow::anyhow!("Locking error: {:?}", e))?;
        match store.take() {
            Some(_) => Ok(()),
            None => Err(model::store::Error::NoSession()),
        }
    }
}
