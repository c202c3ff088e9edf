use serenity::all::Guild;
use tracing::{debug, error};

use crate::models::handler::Handler;

impl Handler {
    /// Keeps the owner and preferred locale of a guild current.
    pub async fn on_guild_create(&self, guild: Guild) {
        let guild_id = guild.id.get() as i64;
        let store = self.manager.store();

        let mut settings = match store.settings(guild_id).await {
            Ok(settings) => settings,
            Err(err) => {
                error!("Could not load settings of guild {guild_id}. Failed with error: {err:?}");
                return;
            }
        };
        let owner_id = Some(guild.owner_id.get() as i64);
        let locale = Some(guild.preferred_locale.clone());
        if settings.owner_id == owner_id && settings.locale == locale {
            return;
        }

        settings.owner_id = owner_id;
        settings.locale = locale;
        if let Err(err) = store.save_settings(&settings).await {
            error!("Could not save settings of guild {guild_id}. Failed with error: {err:?}");
            return;
        }
        debug!("Updated owner and locale of guild {guild_id}");
    }
}
