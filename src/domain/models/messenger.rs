use std::fmt;

use anyhow::Result;
use async_trait::async_trait;

use super::Reply;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    /// `None` for messages without text (stickers, photos, ...).
    pub text: Option<String>,
}

/// Every update has to be acknowledged through the offset, including the ones
/// carrying no message, or the platform keeps redelivering them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundUpdate {
    pub update_id: i64,
    pub message: Option<InboundMessage>,
}

#[async_trait]
pub trait Messenger {
    /// Used at startup to verify the access token is accepted before any
    /// updates are consumed.
    async fn health_check(&self) -> Result<()>;

    /// Long polls for updates newer than `offset`. Returns an empty list when
    /// the poll times out without new updates.
    async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<InboundUpdate>>;

    async fn send_reply(&self, chat_id: ChatId, reply: &Reply) -> Result<()>;
}

pub type MessengerBox = Box<dyn Messenger + Send + Sync>;
