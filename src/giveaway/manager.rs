use std::{collections::HashMap, sync::Arc};

use serenity::all::Permissions;
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

use super::{
    cooldown::CooldownTracker,
    entries::EntryTracker,
    error::GiveawayError,
    render::{
        manifest_key_from_url, render_ended, render_log_message, render_running,
        render_winner_message,
    },
    scheduler::ScheduleSender,
    validation::validate_and_construct,
    winners::select_winners,
};
use crate::{
    database::{GiveawayStore, StoreResult},
    messaging::{message::OutgoingMessage, BlobUploader, Messenger},
    models::{
        giveaway::{Giveaway, GiveawayDraft},
        manifest::{Manifest, MANIFEST_FILENAME},
        settings::GuildSettings,
        tier::PremiumTier,
        user::CachedUser,
    },
};

pub const REQUIRED_PERMISSIONS: Permissions = Permissions::SEND_MESSAGES
    .union(Permissions::VIEW_CHANNEL)
    .union(Permissions::READ_MESSAGE_HISTORY)
    .union(Permissions::EMBED_LINKS);

/// Outcome of ending a giveaway that this caller claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndReport {
    pub entrants: usize,
    pub winners: Vec<i64>,
    pub manifest_key: Option<String>,
    /// False when the announcement edit or the winner follow-up failed.
    pub confirmed: bool,
}

pub struct GiveawayManager {
    store: Arc<dyn GiveawayStore>,
    messenger: Arc<dyn Messenger>,
    uploader: Arc<dyn BlobUploader>,
    entries: EntryTracker,
    cooldowns: CooldownTracker,
    schedule: ScheduleSender,
}

impl GiveawayManager {
    pub fn new(
        store: Arc<dyn GiveawayStore>,
        messenger: Arc<dyn Messenger>,
        uploader: Arc<dyn BlobUploader>,
        schedule: ScheduleSender,
    ) -> Self {
        GiveawayManager {
            entries: EntryTracker::new(store.clone()),
            store,
            messenger,
            uploader,
            cooldowns: CooldownTracker::default(),
            schedule,
        }
    }

    pub fn store(&self) -> &Arc<dyn GiveawayStore> {
        &self.store
    }

    pub fn entries(&self) -> &EntryTracker {
        &self.entries
    }

    pub fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    /// The better of the host's own tier and the guild owner's tier.
    pub async fn tier_for(&self, guild_id: i64, user_id: i64) -> StoreResult<PremiumTier> {
        let user_tier = PremiumTier::from_level(self.store.premium_level(user_id).await?);
        let owner_tier = match self.store.settings(guild_id).await?.owner_id {
            Some(owner_id) if owner_id != user_id => {
                PremiumTier::from_level(self.store.premium_level(owner_id).await?)
            }
            _ => PremiumTier::Free,
        };
        Ok(user_tier.max(owner_tier))
    }

    pub fn construct_giveaway(
        &self,
        host_id: i64,
        duration: &str,
        winners: &str,
        prize: &str,
        description: Option<&str>,
        tier: PremiumTier,
    ) -> Result<GiveawayDraft, GiveawayError> {
        Ok(validate_and_construct(
            host_id,
            duration,
            winners,
            prize,
            description,
            tier,
            OffsetDateTime::now_utc(),
        )?)
    }

    /// Refuses creation while the guild is cooling down from a failure, when
    /// the bot lacks `permissions` it needs in the channel, or when the tier's
    /// cap on running giveaways is reached.
    pub async fn check_availability(
        &self,
        guild_id: i64,
        channel_id: i64,
        tier: PremiumTier,
        permissions: Permissions,
    ) -> Result<(), GiveawayError> {
        if self.cooldowns.is_on_cooldown(guild_id) {
            return Err(GiveawayError::Cooldown);
        }
        if !permissions.contains(REQUIRED_PERMISSIONS) {
            return Err(GiveawayError::MissingPermissions);
        }

        let per_channel = tier.per_channel_limit();
        let current = if per_channel {
            self.store.count_by_channel(channel_id).await?
        } else {
            self.store.count_by_guild(guild_id).await?
        };
        if current >= tier.max_giveaways() {
            return Err(GiveawayError::LimitReached {
                current,
                limit: tier.max_giveaways(),
                per_channel,
            });
        }
        Ok(())
    }

    /// Posts the announcement and persists the giveaway under the message id
    /// it was given. Nothing is stored unless the announcement exists.
    pub async fn send_giveaway(
        &self,
        draft: GiveawayDraft,
        guild_id: i64,
        channel_id: i64,
    ) -> Result<i64, GiveawayError> {
        let settings = self.store.settings(guild_id).await?;
        let announcement = render_running(&draft, &settings, 0);
        debug!("Attempting giveaway creation in guild {guild_id}, channel {channel_id}");

        let sent = match self.messenger.send_message(channel_id, &announcement).await {
            Ok(sent) => sent,
            Err(err) => {
                self.cooldowns.record_failure(guild_id);
                warn!("Could not create giveaway in channel {channel_id} of guild {guild_id}. Failed with error: {err:?}");
                return Err(err.into());
            }
        };
        if sent.channel_id != channel_id {
            error!(
                "Giveaway {} was posted to channel {} instead of {channel_id}",
                sent.message_id, sent.channel_id
            );
        }

        let giveaway = draft.into_giveaway(sent.message_id, channel_id, guild_id);
        if let Err(err) = self.store.create_giveaway(&giveaway).await {
            if let Err(delete_err) = self
                .messenger
                .delete_message(channel_id, sent.message_id)
                .await
            {
                warn!(
                    "Could not remove orphaned announcement {}. Failed with error: {delete_err:?}",
                    sent.message_id
                );
            }
            return Err(err.into());
        }

        info!(
            "Created giveaway {} in guild {guild_id} ending at {}",
            giveaway.message_id,
            giveaway.end_time()
        );
        if self.schedule.send(giveaway).is_err() {
            warn!(
                "Scheduler is not listening, giveaway {} waits for the next resync",
                sent.message_id
            );
        }
        Ok(sent.message_id)
    }

    /// Claims the giveaway, draws winners, uploads the manifest, freezes the
    /// announcement and posts the results.
    ///
    /// Returns `Ok(None)` when someone else already claimed it. Once claimed the
    /// record is gone for good: messaging failures only clear
    /// [`EndReport::confirmed`].
    pub async fn end_giveaway(&self, giveaway: &Giveaway) -> StoreResult<Option<EndReport>> {
        let Some(entrants) = self.store.claim_giveaway(giveaway.message_id).await? else {
            debug!("Giveaway {} was already ended elsewhere", giveaway.message_id);
            return Ok(None);
        };
        let winners = select_winners(&entrants, giveaway.winner_count());

        let known = self.known_users(giveaway, &entrants).await;
        let manifest_key = match Manifest::new(giveaway, &entrants, &winners, &known).to_bytes() {
            Ok(bytes) => self
                .uploader
                .upload(bytes, MANIFEST_FILENAME)
                .await
                .and_then(|url| manifest_key_from_url(&url)),
            Err(err) => {
                error!(
                    "Could not serialise manifest of giveaway {}. Failed with error: {err:?}",
                    giveaway.message_id
                );
                None
            }
        };
        if manifest_key.is_none() {
            warn!("Giveaway {} ended without a summary", giveaway.message_id);
        }

        let mut confirmed = true;
        let ended = render_ended(giveaway, entrants.len(), &winners, manifest_key.as_deref());
        if let Err(err) = self
            .messenger
            .edit_message(giveaway.channel_id, giveaway.message_id, &ended)
            .await
        {
            warn!(
                "Could not update announcement of ended giveaway {}. Failed with error: {err:?}",
                giveaway.message_id
            );
            confirmed = false;
        }
        if let Err(err) = self
            .messenger
            .send_message(giveaway.channel_id, &render_winner_message(giveaway, &winners))
            .await
        {
            warn!(
                "Could not announce winners of giveaway {}. Failed with error: {err:?}",
                giveaway.message_id
            );
            confirmed = false;
        }

        self.log_ending(giveaway, entrants.len(), &winners, manifest_key.as_deref())
            .await;

        info!(
            "Ended giveaway {} with {} entrants and {} winners",
            giveaway.message_id,
            entrants.len(),
            winners.len()
        );
        Ok(Some(EndReport {
            entrants: entrants.len(),
            winners,
            manifest_key,
            confirmed,
        }))
    }

    /// Cached profiles of the host and entrants. A summary without names is
    /// still a valid summary, so lookup failures only cost the names.
    async fn known_users(&self, giveaway: &Giveaway, entrants: &[i64]) -> HashMap<i64, CachedUser> {
        let mut ids = entrants.to_vec();
        ids.push(giveaway.draft.host_id);
        match self.store.cached_users(&ids).await {
            Ok(users) => users.into_iter().map(|user| (user.user_id, user)).collect(),
            Err(err) => {
                warn!(
                    "Could not load profiles for the summary of giveaway {}. Failed with error: {err:?}",
                    giveaway.message_id
                );
                HashMap::new()
            }
        }
    }

    /// Posts the outcome to the guild's log channel, if it has one. Failures
    /// here never affect the ending itself.
    async fn log_ending(
        &self,
        giveaway: &Giveaway,
        entries: usize,
        winners: &[i64],
        manifest_key: Option<&str>,
    ) {
        let log_channel = match self.store.settings(giveaway.guild_id).await {
            Ok(settings) => settings.log_channel,
            Err(err) => {
                warn!(
                    "Could not load settings of guild {} to log giveaway {}. Failed with error: {err:?}",
                    giveaway.guild_id, giveaway.message_id
                );
                return;
            }
        };
        let Some(log_channel) = log_channel else {
            return;
        };

        let message = render_log_message(giveaway, entries, winners, manifest_key);
        if let Err(err) = self.messenger.send_message(log_channel, &message).await {
            warn!(
                "Could not log ending of giveaway {} to channel {log_channel}. Failed with error: {err:?}",
                giveaway.message_id
            );
        }
    }

    /// Drops the giveaway without drawing winners. The announcement removal is
    /// best effort. Returns false when there was nothing left to delete.
    pub async fn delete_giveaway(&self, giveaway: &Giveaway) -> StoreResult<bool> {
        if self.store.claim_giveaway(giveaway.message_id).await?.is_none() {
            return Ok(false);
        }
        if let Err(err) = self
            .messenger
            .delete_message(giveaway.channel_id, giveaway.message_id)
            .await
        {
            warn!(
                "Could not delete announcement of giveaway {}. Failed with error: {err:?}",
                giveaway.message_id
            );
        }
        info!("Deleted giveaway {}", giveaway.message_id);
        Ok(true)
    }

    /// Draws `count` fresh winners from a finished giveaway's manifest.
    pub async fn reroll(&self, manifest_key: &str, count: usize) -> Result<Vec<i64>, GiveawayError> {
        let bytes = self
            .uploader
            .download(manifest_key, MANIFEST_FILENAME)
            .await
            .map_err(|err| GiveawayError::ManifestUnavailable(err.to_string()))?;
        let manifest = Manifest::from_bytes(&bytes)
            .map_err(|err| GiveawayError::ManifestUnavailable(err.to_string()))?;

        let winners = select_winners(&manifest.entrant_ids(), count);
        debug!(
            "Rerolled {} winners for giveaway {}",
            winners.len(),
            manifest.giveaway.id
        );
        Ok(winners)
    }

    async fn render_announcement(&self, giveaway: &Giveaway) -> StoreResult<OutgoingMessage> {
        let settings = self.store.settings(giveaway.guild_id).await?;
        let entries = self.entries.entry_count(giveaway.message_id).await?;
        Ok(render_running(
            &giveaway.draft,
            &settings,
            usize::try_from(entries).unwrap_or(0),
        ))
    }

    /// Current announcement of a running giveaway, entry count included, or
    /// `None` once it has been claimed. The record is looked up again after
    /// rendering so an ended announcement is not put back to running.
    pub async fn running_announcement(
        &self,
        giveaway_id: i64,
    ) -> StoreResult<Option<(Giveaway, OutgoingMessage)>> {
        let Some(giveaway) = self.store.giveaway(giveaway_id).await? else {
            return Ok(None);
        };
        let announcement = self.render_announcement(&giveaway).await?;
        if self.store.giveaway(giveaway_id).await?.is_none() {
            debug!("Giveaway {giveaway_id} ended while its announcement was rendered");
            return Ok(None);
        }
        Ok(Some((giveaway, announcement)))
    }

    /// Re-renders a running giveaway's announcement. Quietly does nothing
    /// once the giveaway is gone.
    pub async fn refresh_announcement(&self, giveaway_id: i64) -> Result<(), GiveawayError> {
        let Some((giveaway, announcement)) = self.running_announcement(giveaway_id).await? else {
            return Ok(());
        };
        if let Err(err) = self
            .messenger
            .edit_message(giveaway.channel_id, giveaway.message_id, &announcement)
            .await
        {
            warn!("Could not refresh announcement of giveaway {giveaway_id}. Failed with error: {err:?}");
        }
        Ok(())
    }

    /// Caches a user's profile for giveaway summaries. Failures are logged
    /// and otherwise ignored.
    pub async fn remember_user(&self, user: &CachedUser) {
        if let Err(err) = self.store.cache_user(user).await {
            warn!("Could not cache profile of user {}. Failed with error: {err:?}", user.user_id);
        }
    }

    /// Loads the guild's settings, applies `change` and saves the result.
    pub async fn update_settings<F>(&self, guild_id: i64, change: F) -> StoreResult<GuildSettings>
    where
        F: FnOnce(&mut GuildSettings) + Send,
    {
        let mut settings = self.store.settings(guild_id).await?;
        change(&mut settings);
        self.store.save_settings(&settings).await?;
        debug!("Updated settings of guild {guild_id}");
        Ok(settings)
    }

    pub async fn running_in_channel(&self, channel_id: i64) -> StoreResult<Vec<Giveaway>> {
        self.store.giveaways_by_channel(channel_id).await
    }

    /// Running giveaway by id, restricted to one guild.
    pub async fn find(&self, guild_id: i64, giveaway_id: i64) -> Result<Giveaway, GiveawayError> {
        match self.store.giveaway(giveaway_id).await? {
            Some(giveaway) if giveaway.guild_id == guild_id => Ok(giveaway),
            _ => Err(GiveawayError::NotFound),
        }
    }
}
