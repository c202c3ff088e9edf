#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Button {
    Action {
        custom_id: String,
        label: String,
        emoji: Option<String>,
    },
    Link {
        label: String,
        url: String,
    },
}

/// Platform-neutral rendering of a message. Sending an empty `buttons` list
/// on edit removes whatever components the message had.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutgoingMessage {
    pub content: Option<String>,
    pub embed: Option<Embed>,
    pub buttons: Vec<Button>,
    pub reply_to: Option<i64>,
    pub mention_users: bool,
}

impl OutgoingMessage {
    pub fn new() -> Self {
        OutgoingMessage::default()
    }

    pub fn content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);
        self
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    pub fn mention_users(mut self, mention: bool) -> Self {
        self.mention_users = mention;
        self
    }
}
