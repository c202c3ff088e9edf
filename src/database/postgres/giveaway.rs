use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{debug, error};

use crate::{database::StoreResult, models::giveaway::Giveaway};

const GIVEAWAY_COLUMNS: &str =
    "message_id, channel_id, guild_id, host_id, end_time, winners, prize, description";

pub async fn get_giveaway(pool: &PgPool, id: i64) -> StoreResult<Option<Giveaway>> {
    let query = format!("SELECT {GIVEAWAY_COLUMNS} FROM giveaways WHERE message_id = $1");
    match sqlx::query_as::<_, Giveaway>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
    {
        Ok(giveaway) => Ok(giveaway),
        Err(err) => {
            error!("Could not get giveaway {id} from database. Failed with error: {err:?}");
            Err(err.into())
        }
    }
}

pub async fn insert_giveaway(pool: &PgPool, giveaway: &Giveaway) -> StoreResult<()> {
    if let Err(err) = sqlx::query(
        "INSERT INTO giveaways (message_id, channel_id, guild_id, host_id, end_time, winners, prize, description) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(giveaway.message_id)
    .bind(giveaway.channel_id)
    .bind(giveaway.guild_id)
    .bind(giveaway.draft.host_id)
    .bind(giveaway.draft.end_time)
    .bind(giveaway.draft.winners)
    .bind(&giveaway.draft.prize)
    .bind(&giveaway.draft.description)
    .execute(pool)
    .await
    {
        error!(
            "Could not insert giveaway {} into database. Failed with error: {:?}",
            giveaway.message_id, err
        );
        return Err(err.into());
    }
    Ok(())
}

/// Locks the giveaway row, snapshots its entries and deletes it (entries
/// cascade) in one transaction. Concurrent claimers block on the row lock and
/// then find nothing; concurrent entry inserts block on the foreign key and
/// then fail, so the snapshot is exactly the final entrant set.
pub async fn claim_giveaway(pool: &PgPool, id: i64) -> StoreResult<Option<Vec<i64>>> {
    let mut tx = pool.begin().await?;

    let locked: Option<i64> =
        sqlx::query_scalar("SELECT message_id FROM giveaways WHERE message_id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    if locked.is_none() {
        tx.rollback().await?;
        debug!("Giveaway {id} was already claimed");
        return Ok(None);
    }

    let entries: Vec<i64> =
        sqlx::query_scalar("SELECT user_id FROM giveaway_entries WHERE giveaway_id = $1")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

    sqlx::query("DELETE FROM giveaways WHERE message_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if let Err(err) = tx.commit().await {
        error!("Could not commit claim of giveaway {id}. Failed with error: {err:?}");
        return Err(err.into());
    }

    Ok(Some(entries))
}

pub async fn get_giveaways_ending_by(
    pool: &PgPool,
    instant: OffsetDateTime,
) -> StoreResult<Vec<Giveaway>> {
    let query = format!(
        "SELECT {GIVEAWAY_COLUMNS} FROM giveaways WHERE end_time <= $1 ORDER BY end_time"
    );
    match sqlx::query_as::<_, Giveaway>(&query)
        .bind(instant)
        .fetch_all(pool)
        .await
    {
        Ok(giveaways) => Ok(giveaways),
        Err(err) => {
            error!("Could not get giveaways ending by {instant}. Failed with error: {err:?}");
            Err(err.into())
        }
    }
}

pub async fn get_giveaways_by_channel(pool: &PgPool, channel_id: i64) -> StoreResult<Vec<Giveaway>> {
    let query = format!(
        "SELECT {GIVEAWAY_COLUMNS} FROM giveaways WHERE channel_id = $1 ORDER BY end_time"
    );
    Ok(sqlx::query_as::<_, Giveaway>(&query)
        .bind(channel_id)
        .fetch_all(pool)
        .await?)
}

pub async fn get_giveaways_by_guild(pool: &PgPool, guild_id: i64) -> StoreResult<Vec<Giveaway>> {
    let query =
        format!("SELECT {GIVEAWAY_COLUMNS} FROM giveaways WHERE guild_id = $1 ORDER BY end_time");
    Ok(sqlx::query_as::<_, Giveaway>(&query)
        .bind(guild_id)
        .fetch_all(pool)
        .await?)
}

pub async fn count_giveaways_by_channel(pool: &PgPool, channel_id: i64) -> StoreResult<i64> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM giveaways WHERE channel_id = $1")
            .bind(channel_id)
            .fetch_one(pool)
            .await?,
    )
}

pub async fn count_giveaways_by_guild(pool: &PgPool, guild_id: i64) -> StoreResult<i64> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM giveaways WHERE guild_id = $1")
            .bind(guild_id)
            .fetch_one(pool)
            .await?,
    )
}
