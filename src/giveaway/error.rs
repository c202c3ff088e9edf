use thiserror::Error;

use super::validation::ValidationError;
use crate::{database::StoreError, messaging::SendError};

fn limit_scope(per_channel: &bool) -> &'static str {
    if *per_channel {
        "this channel"
    } else {
        "this server"
    }
}

#[derive(Debug, Error)]
pub enum GiveawayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a giveaway recently failed to start here, please wait a moment before trying again")]
    Cooldown,
    #[error("the bot is missing permissions to post giveaways in this channel")]
    MissingPermissions,
    #[error("{} already has {current} running giveaways, the limit is {limit}", limit_scope(.per_channel))]
    LimitReached {
        current: i64,
        limit: i64,
        per_channel: bool,
    },
    #[error("the giveaway announcement could not be created")]
    Creation,
    #[error("giveaway not found")]
    NotFound,
    #[error("the giveaway summary could not be read: {0}")]
    ManifestUnavailable(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<SendError> for GiveawayError {
    fn from(err: SendError) -> Self {
        match err {
            SendError::MissingPermissions(_) => GiveawayError::MissingPermissions,
            SendError::UnknownResource(_) | SendError::Failed(_) => GiveawayError::Creation,
        }
    }
}
