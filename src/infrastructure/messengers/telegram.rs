#[cfg(test)]
#[path = "telegram_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatId;
use crate::domain::models::InboundMessage;
use crate::domain::models::InboundUpdate;
use crate::domain::models::Keyboard;
use crate::domain::models::Messenger;
use crate::domain::models::Reply;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<T>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct User {
    id: i64,
    #[serde(default)]
    username: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Message {
    chat: Chat,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Update {
    update_id: i64,
    #[serde(default)]
    message: Option<Message>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: Vec<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct KeyboardButton {
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum ReplyMarkup {
    Keyboard {
        keyboard: Vec<Vec<KeyboardButton>>,
        one_time_keyboard: bool,
        resize_keyboard: bool,
    },
    Remove {
        remove_keyboard: bool,
    },
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SendMessageRequest {
    chat_id: i64,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyMarkup>,
}

impl SendMessageRequest {
    fn new(chat_id: ChatId, reply: &Reply) -> SendMessageRequest {
        let reply_markup = match &reply.keyboard {
            Keyboard::Keep => None,
            Keyboard::Choices(rows) => Some(ReplyMarkup::Keyboard {
                keyboard: rows
                    .iter()
                    .map(|row| {
                        return row
                            .iter()
                            .map(|text| {
                                return KeyboardButton {
                                    text: text.to_string(),
                                };
                            })
                            .collect();
                    })
                    .collect(),
                one_time_keyboard: true,
                resize_keyboard: true,
            }),
            Keyboard::Remove => Some(ReplyMarkup::Remove {
                remove_keyboard: true,
            }),
        };

        let mut parse_mode = None;
        if reply.markdown {
            parse_mode = Some("Markdown".to_string());
        }

        return SendMessageRequest {
            chat_id: chat_id.0,
            text: reply.text.to_string(),
            parse_mode,
            reply_markup,
        };
    }
}

/// Telegram Bot API client using long polling.
pub struct Telegram {
    url: String,
    token: String,
    poll_timeout: String,
}

impl Default for Telegram {
    fn default() -> Telegram {
        return Telegram {
            url: Config::get(ConfigKey::TelegramURL),
            token: Config::get(ConfigKey::TelegramToken),
            poll_timeout: Config::get(ConfigKey::PollTimeout),
        };
    }
}

impl Telegram {
    #[allow(clippy::implicit_return)]
    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T> {
        // Errors are stripped of their URL as it carries the token.
        let res = reqwest::Client::new()
            .post(format!(
                "{url}/bot{token}/{method}",
                url = self.url,
                token = self.token
            ))
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|err| return err.without_url())?;

        let status = res.status().as_u16();
        if status != 200 {
            let description = res
                .json::<ApiResponse<serde_json::Value>>()
                .await
                .ok()
                .and_then(|payload| return payload.description)
                .unwrap_or_default();
            bail!("Telegram {method} request failed with status {status}: {description}");
        }

        let payload = res
            .json::<ApiResponse<T>>()
            .await
            .map_err(|err| return err.without_url())?;

        if !payload.ok {
            let description = payload.description.unwrap_or_default();
            bail!("Telegram {method} request was rejected: {description}");
        }

        match payload.result {
            Some(result) => return Ok(result),
            None => bail!("Telegram {method} response has no result"),
        }
    }
}

#[async_trait]
impl Messenger for Telegram {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.token.is_empty() {
            bail!("Telegram bot token is not defined");
        }

        let me: User = self
            .call("getMe", &serde_json::json!({}), REQUEST_TIMEOUT)
            .await?;

        tracing::info!(id = me.id, username = ?me.username, "Connected to Telegram");

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<InboundUpdate>> {
        let poll_timeout = self.poll_timeout.parse::<u64>()?;
        let req = GetUpdatesRequest {
            offset,
            timeout: poll_timeout,
            allowed_updates: vec!["message".to_string()],
        };

        let updates: Vec<Update> = self
            .call(
                "getUpdates",
                &req,
                Duration::from_secs(poll_timeout) + REQUEST_TIMEOUT,
            )
            .await?;

        tracing::debug!(count = updates.len(), "Received updates");

        // Updates queued before the subscription changed may still carry edits
        // or other payloads. They are kept without a message so their ids are
        // acknowledged.
        let inbound: Vec<InboundUpdate> = updates
            .into_iter()
            .map(|update| {
                return InboundUpdate {
                    update_id: update.update_id,
                    message: update.message.map(|message| {
                        return InboundMessage {
                            chat_id: ChatId(message.chat.id),
                            text: message.text,
                        };
                    }),
                };
            })
            .collect();

        return Ok(inbound);
    }

    #[allow(clippy::implicit_return)]
    async fn send_reply(&self, chat_id: ChatId, reply: &Reply) -> Result<()> {
        let req = SendMessageRequest::new(chat_id, reply);
        let _: serde_json::Value = self.call("sendMessage", &req, REQUEST_TIMEOUT).await?;

        return Ok(());
    }
}
