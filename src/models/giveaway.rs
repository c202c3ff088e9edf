use sqlx::FromRow;
use time::OffsetDateTime;

/// A validated giveaway that has not been announced yet.
///
/// Drafts have no identity: the announcement's message id becomes the
/// giveaway id, so a draft only turns into a [`Giveaway`] once the message
/// exists.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct GiveawayDraft {
    pub host_id: i64,
    pub end_time: OffsetDateTime,
    pub winners: i32,
    pub prize: String,
    pub description: Option<String>,
}

impl GiveawayDraft {
    pub fn into_giveaway(self, message_id: i64, channel_id: i64, guild_id: i64) -> Giveaway {
        Giveaway {
            message_id,
            channel_id,
            guild_id,
            draft: self,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Giveaway {
    pub message_id: i64,
    pub channel_id: i64,
    pub guild_id: i64,
    #[sqlx(flatten)]
    pub draft: GiveawayDraft,
}

impl Giveaway {
    pub fn end_time(&self) -> OffsetDateTime {
        self.draft.end_time
    }

    pub fn prize(&self) -> &str {
        &self.draft.prize
    }

    pub fn winner_count(&self) -> usize {
        usize::try_from(self.draft.winners).unwrap_or(0)
    }
}
