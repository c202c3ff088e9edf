use sqlx::PgPool;
use tracing::error;

use crate::{database::StoreResult, models::user::CachedUser};

/// Rows are only rewritten when the profile actually changed.
pub async fn upsert_user(pool: &PgPool, user: &CachedUser) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO cached_users (user_id, username, discriminator, avatar) VALUES ($1, $2, $3, $4) \
         ON CONFLICT (user_id) DO UPDATE SET username = $2, discriminator = $3, avatar = $4 \
         WHERE (cached_users.username, cached_users.discriminator, cached_users.avatar) \
         IS DISTINCT FROM (EXCLUDED.username, EXCLUDED.discriminator, EXCLUDED.avatar)",
    )
    .bind(user.user_id)
    .bind(&user.username)
    .bind(&user.discriminator)
    .bind(&user.avatar)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_users(pool: &PgPool, user_ids: &[i64]) -> StoreResult<Vec<CachedUser>> {
    match sqlx::query_as::<_, CachedUser>(
        "SELECT user_id, username, discriminator, avatar FROM cached_users WHERE user_id = ANY($1)",
    )
    .bind(user_ids)
    .fetch_all(pool)
    .await
    {
        Ok(users) => Ok(users),
        Err(err) => {
            error!(
                "Could not get {} cached users. Failed with error: {err:?}",
                user_ids.len()
            );
            Err(err.into())
        }
    }
}
