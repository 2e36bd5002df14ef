#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::models::ChatId;
use crate::domain::models::Session;
use crate::domain::models::SessionStore;

/// Sessions kept for the lifetime of the process. Nothing survives a restart.
#[derive(Default)]
pub struct Sessions {
    sessions: DashMap<ChatId, Session>,
}

#[async_trait]
impl SessionStore for Sessions {
    async fn get(&self, id: ChatId) -> Result<Option<Session>> {
        return Ok(self.sessions.get(&id).map(|entry| return entry.value().clone()));
    }

    async fn put(&self, id: ChatId, session: Session) -> Result<()> {
        self.sessions.insert(id, session);
        return Ok(());
    }

    async fn delete(&self, id: ChatId) -> Result<()> {
        self.sessions.remove(&id);
        return Ok(());
    }
}
