#[cfg(test)]
#[path = "bot_commands_test.rs"]
mod tests;

pub struct BotCommand {
    command: String,
}

impl BotCommand {
    /// Parses the leading token of a message as a command. Telegram appends
    /// `@botname` to commands picked from the menu in group chats, which is
    /// dropped.
    pub fn parse(text: &str) -> Option<BotCommand> {
        let token = text.split_whitespace().next()?;
        if !token.starts_with('/') || token.len() < 2 {
            return None;
        }

        let command = token.split('@').next().unwrap_or(token).to_string();

        return Some(BotCommand { command });
    }

    pub fn is_start(&self) -> bool {
        return self.command == "/start";
    }

    pub fn is_job_selection(&self) -> bool {
        return self.command == "/job_selection";
    }
}
