use sqlx::PgPool;
use tracing::{debug, error};

use crate::{database::StoreResult, models::settings::GuildSettings};

pub async fn get_guild_settings(pool: &PgPool, guild_id: i64) -> StoreResult<Option<GuildSettings>> {
    debug!("Querying main database for guild {guild_id} settings");
    match sqlx::query_as::<_, GuildSettings>(
        "SELECT guild_id, color, emoji, log_channel, locale, owner_id FROM guild_settings WHERE guild_id = $1",
    )
    .bind(guild_id)
    .fetch_optional(pool)
    .await
    {
        Ok(settings) => Ok(settings),
        Err(err) => {
            error!(
                "Attempted to query main database for guild {guild_id} settings, failed with error: {err}",
            );
            Err(err.into())
        }
    }
}

pub async fn upsert_guild_settings(pool: &PgPool, settings: &GuildSettings) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO guild_settings (guild_id, color, emoji, log_channel, locale, owner_id) VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (guild_id) DO UPDATE SET color = $2, emoji = $3, log_channel = $4, locale = $5, owner_id = $6",
    )
    .bind(settings.guild_id)
    .bind(settings.color)
    .bind(&settings.emoji)
    .bind(settings.log_channel)
    .bind(&settings.locale)
    .bind(settings.owner_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_premium_level(pool: &PgPool, user_id: i64) -> StoreResult<i32> {
    let level: Option<i32> = sqlx::query_scalar("SELECT level FROM premium_users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(level.unwrap_or(0))
}
