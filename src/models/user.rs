use serenity::all::User;
use sqlx::FromRow;

/// Last known profile of a user, kept so giveaway summaries can show names
/// long after the interaction that provided them.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CachedUser {
    pub user_id: i64,
    pub username: String,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
}

impl From<&User> for CachedUser {
    fn from(user: &User) -> Self {
        CachedUser {
            user_id: user.id.get() as i64,
            username: user.name.clone(),
            discriminator: user
                .discriminator
                .map(|discriminator| format!("{:04}", discriminator.get())),
            avatar: user.avatar.as_ref().map(ToString::to_string),
        }
    }
}
