use std::sync::Arc;

use serenity::{
    all::{ButtonStyle, ChannelId, MessageId, MessageReference, ReactionType, Timestamp},
    builder::{
        CreateActionRow, CreateAllowedMentions, CreateButton, CreateEmbed,
        CreateInteractionResponseMessage, CreateMessage, EditMessage,
    },
    http::{Http, HttpError},
};
use tracing::debug;

use super::{
    message::{Button, Embed, OutgoingMessage},
    Messenger, SendError, SentMessage,
};

impl From<serenity::Error> for SendError {
    fn from(err: serenity::Error) -> Self {
        if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &err {
            return SendError::from_code(response.error.code, &response.error.message);
        }
        SendError::Failed(err.to_string())
    }
}

fn create_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title(&embed.title)
        .description(&embed.description)
        .color(embed.color);
    if let Ok(timestamp) = Timestamp::from_unix_timestamp(embed.timestamp) {
        builder = builder.timestamp(timestamp);
    }
    builder
}

fn create_components(buttons: &[Button]) -> Vec<CreateActionRow> {
    if buttons.is_empty() {
        return vec![];
    }
    let buttons = buttons
        .iter()
        .map(|button| match button {
            Button::Action {
                custom_id,
                label,
                emoji,
            } => {
                let mut builder = CreateButton::new(custom_id).style(ButtonStyle::Primary);
                if !label.is_empty() {
                    builder = builder.label(label);
                }
                if let Some(emoji) = emoji
                    .as_deref()
                    .and_then(|emoji| ReactionType::try_from(emoji).ok())
                {
                    builder = builder.emoji(emoji);
                }
                builder
            }
            Button::Link { label, url } => CreateButton::new_link(url).label(label),
        })
        .collect();
    vec![CreateActionRow::Buttons(buttons)]
}

fn allowed_mentions(message: &OutgoingMessage) -> CreateAllowedMentions {
    if message.mention_users {
        CreateAllowedMentions::new().all_users(true)
    } else {
        CreateAllowedMentions::new()
    }
}

/// Renders an outgoing message as an interaction callback, used when a button
/// press replies directly instead of going through [`DiscordMessenger`].
pub fn interaction_message(message: &OutgoingMessage) -> CreateInteractionResponseMessage {
    let mut reply = CreateInteractionResponseMessage::new()
        .components(create_components(&message.buttons))
        .allowed_mentions(allowed_mentions(message));
    if let Some(content) = &message.content {
        reply = reply.content(content);
    }
    if let Some(embed) = &message.embed {
        reply = reply.embed(create_embed(embed));
    }
    reply
}

pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        DiscordMessenger { http }
    }
}

#[async_trait::async_trait]
impl Messenger for DiscordMessenger {
    async fn send_message(
        &self,
        channel_id: i64,
        message: &OutgoingMessage,
    ) -> Result<SentMessage, SendError> {
        let channel = ChannelId::new(channel_id as u64);
        let mut builder = CreateMessage::new()
            .components(create_components(&message.buttons))
            .allowed_mentions(allowed_mentions(message));
        if let Some(content) = &message.content {
            builder = builder.content(content);
        }
        if let Some(embed) = &message.embed {
            builder = builder.embed(create_embed(embed));
        }
        if let Some(reply_to) = message.reply_to {
            builder = builder.reference_message(MessageReference::from((
                channel,
                MessageId::new(reply_to as u64),
            )));
        }

        let start = std::time::Instant::now();
        let sent = channel.send_message(&*self.http, builder).await?;
        debug!("Took {:?} to send a message to channel {channel_id}", start.elapsed());

        Ok(SentMessage {
            message_id: sent.id.get() as i64,
            channel_id: sent.channel_id.get() as i64,
        })
    }

    async fn edit_message(
        &self,
        channel_id: i64,
        message_id: i64,
        message: &OutgoingMessage,
    ) -> Result<(), SendError> {
        let mut builder = EditMessage::new().components(create_components(&message.buttons));
        if let Some(content) = &message.content {
            builder = builder.content(content);
        }
        if let Some(embed) = &message.embed {
            builder = builder.embed(create_embed(embed));
        }

        ChannelId::new(channel_id as u64)
            .edit_message(&*self.http, MessageId::new(message_id as u64), builder)
            .await?;
        Ok(())
    }

    async fn delete_message(&self, channel_id: i64, message_id: i64) -> Result<(), SendError> {
        ChannelId::new(channel_id as u64)
            .delete_message(&*self.http, MessageId::new(message_id as u64))
            .await?;
        Ok(())
    }
}
