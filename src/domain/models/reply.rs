#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Keyboard {
    /// Leave whatever keyboard the chat currently shows.
    #[default]
    Keep,
    Choices(Vec<Vec<String>>),
    Remove,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub markdown: bool,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn new(text: &str) -> Reply {
        return Reply {
            text: text.to_string(),
            markdown: false,
            keyboard: Keyboard::Keep,
        };
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Reply {
        self.keyboard = keyboard;
        return self;
    }

    pub fn with_markdown(mut self) -> Reply {
        self.markdown = true;
        return self;
    }
}
