use serenity::builder::{CreateActionRow, CreateAllowedMentions, CreateEmbed};

use crate::{database::StoreError, giveaway::error::GiveawayError};

pub struct Response {
    pub content: Option<String>,
    pub embeds: Option<Vec<CreateEmbed>>,
    pub allowed_mentions: Option<CreateAllowedMentions>,
    pub components: Option<Vec<CreateActionRow>>,
    pub ephemeral: bool,
}

#[derive(Debug)]
pub enum ResponseError {
    Serenity(serenity::Error),
    /// A title shown to the user and an optional hint on how to fix it.
    Execution(&'static str, Option<String>),
}

pub type ResponseResult = Result<(), ResponseError>;

impl Response {
    pub fn new() -> Self {
        Response {
            content: None,
            embeds: None,
            allowed_mentions: None,
            components: None,
            ephemeral: false,
        }
    }

    pub fn content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    pub fn embed(mut self, embed: CreateEmbed) -> Self {
        self.embeds = Some(vec![embed]);
        self
    }

    pub fn allowed_mentions(mut self, allowed_mentions: CreateAllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    pub fn components(mut self, components: Vec<CreateActionRow>) -> Self {
        self.components = Some(components);
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }
}

impl From<serenity::Error> for ResponseError {
    fn from(err: serenity::Error) -> Self {
        ResponseError::Serenity(err)
    }
}

impl From<GiveawayError> for ResponseError {
    fn from(err: GiveawayError) -> Self {
        match err {
            GiveawayError::Validation(err) => {
                ResponseError::Execution("That giveaway is not valid", Some(err.to_string()))
            }
            GiveawayError::Cooldown => ResponseError::Execution(
                "Please wait before trying again",
                Some(err.to_string()),
            ),
            GiveawayError::MissingPermissions => ResponseError::Execution(
                "Missing permissions",
                Some("Make sure the bot can view this channel, send messages, embed links and read message history here.".to_string()),
            ),
            GiveawayError::LimitReached { .. } => {
                ResponseError::Execution("Too many giveaways", Some(err.to_string()))
            }
            GiveawayError::Creation => ResponseError::Execution(
                "The giveaway could not be created",
                Some("Please try again in a moment.".to_string()),
            ),
            GiveawayError::NotFound => ResponseError::Execution(
                "This giveaway could not be found",
                Some("Please use the message ID of a running giveaway in this server".to_string()),
            ),
            GiveawayError::ManifestUnavailable(_) => ResponseError::Execution(
                "The giveaway could not be rerolled",
                Some("The summary of this giveaway is no longer available.".to_string()),
            ),
            GiveawayError::Store(_) => ResponseError::Execution(
                "Something went wrong",
                Some("Please notify the developer of this issue".to_string()),
            ),
        }
    }
}

impl From<StoreError> for ResponseError {
    fn from(err: StoreError) -> Self {
        GiveawayError::from(err).into()
    }
}
