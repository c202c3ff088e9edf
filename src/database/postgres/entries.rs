use sqlx::PgPool;
use tracing::error;

use crate::database::{EntryOutcome, StoreResult};

const FOREIGN_KEY_VIOLATION: &str = "23503";

/// `ON CONFLICT DO NOTHING` makes the membership check and the insert one
/// statement, so simultaneous presses never lose or duplicate an entry.
pub async fn insert_entry(pool: &PgPool, giveaway_id: i64, user_id: i64) -> StoreResult<EntryOutcome> {
    match sqlx::query(
        "INSERT INTO giveaway_entries (giveaway_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(giveaway_id)
    .bind(user_id)
    .execute(pool)
    .await
    {
        Ok(result) if result.rows_affected() == 0 => Ok(EntryOutcome::AlreadyEntered),
        Ok(_) => Ok(EntryOutcome::Entered(count_entries(pool, giveaway_id).await?)),
        Err(sqlx::Error::Database(err)) if err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
            Ok(EntryOutcome::GiveawayMissing)
        }
        Err(err) => {
            error!(
                "Could not insert giveaway entry for giveaway {giveaway_id}. Failed with error: {err:?}"
            );
            Err(err.into())
        }
    }
}

pub async fn delete_entry(pool: &PgPool, giveaway_id: i64, user_id: i64) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM giveaway_entries WHERE giveaway_id = $1 AND user_id = $2")
        .bind(giveaway_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn get_entries(pool: &PgPool, giveaway_id: i64) -> StoreResult<Vec<i64>> {
    match sqlx::query_scalar("SELECT user_id FROM giveaway_entries WHERE giveaway_id = $1")
        .bind(giveaway_id)
        .fetch_all(pool)
        .await
    {
        Ok(entries) => Ok(entries),
        Err(err) => {
            error!("Could not get entries for giveaway {giveaway_id}. Failed with error: {err:?}");
            Err(err.into())
        }
    }
}

pub async fn count_entries(pool: &PgPool, giveaway_id: i64) -> StoreResult<i64> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM giveaway_entries WHERE giveaway_id = $1")
            .bind(giveaway_id)
            .fetch_one(pool)
            .await?,
    )
}
