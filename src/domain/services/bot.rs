#[cfg(test)]
#[path = "bot_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::time;

use super::Conversations;
use crate::domain::models::InboundMessage;
use crate::domain::models::MessengerBox;

const POLL_ERROR_PAUSE: Duration = Duration::from_secs(1);

pub struct BotService {}

impl BotService {
    /// Fetches one batch of updates and answers them in arrival order. Returns
    /// the offset that acknowledges everything fetched.
    ///
    /// Failures while answering a single message are logged and skipped so one
    /// broken chat can't stall the others.
    pub async fn poll_once(
        messenger: &MessengerBox,
        conversations: &Conversations,
        offset: Option<i64>,
    ) -> Result<Option<i64>> {
        let updates = messenger.get_updates(offset).await?;
        let mut next_offset = offset;

        for update in updates {
            next_offset = Some(update.update_id + 1);

            let (chat_id, text) = match update.message {
                Some(InboundMessage {
                    chat_id,
                    text: Some(text),
                }) => (chat_id, text),
                _ => continue,
            };

            let reply = match conversations.handle(chat_id, &text).await {
                Ok(Some(reply)) => reply,
                Ok(None) => continue,
                Err(err) => {
                    tracing::error!(error = ?err, chat_id = chat_id.0, "Failed to handle message");
                    continue;
                }
            };

            if let Err(err) = messenger.send_reply(chat_id, &reply).await {
                tracing::error!(error = ?err, chat_id = chat_id.0, "Failed to send reply");
            }
        }

        return Ok(next_offset);
    }

    pub async fn start(messenger: MessengerBox, conversations: Conversations) -> Result<()> {
        tracing::info!("Polling for updates");

        let mut offset = None;
        loop {
            match BotService::poll_once(&messenger, &conversations, offset).await {
                Ok(next_offset) => offset = next_offset,
                Err(err) => {
                    tracing::error!(error = ?err, "Failed to poll for updates");
                    time::sleep(POLL_ERROR_PAUSE).await;
                }
            }
        }
    }
}
