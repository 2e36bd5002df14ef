use anyhow::Result;
use async_trait::async_trait;

use super::ChatId;

/// Where a chat currently is in the job selection dialogue, together with
/// every answer collected so far. Answers only exist on the variants that
/// follow the question they answer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Idle,
    AwaitingTitle,
    AwaitingSalary {
        title: String,
    },
    AwaitingExperience {
        title: String,
        salary: u64,
    },
}

impl Session {
    pub fn is_idle(&self) -> bool {
        return *self == Session::Idle;
    }
}

#[async_trait]
pub trait SessionStore {
    async fn get(&self, id: ChatId) -> Result<Option<Session>>;

    async fn put(&self, id: ChatId, session: Session) -> Result<()>;

    async fn delete(&self, id: ChatId) -> Result<()>;
}

pub type SessionStoreBox = Box<dyn SessionStore + Send + Sync>;
