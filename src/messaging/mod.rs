use thiserror::Error;

use self::message::OutgoingMessage;

pub mod discord;
#[cfg(test)]
pub mod fake;
pub mod message;
pub mod webhook;

pub const UNKNOWN_CHANNEL: isize = 10003;
pub const UNKNOWN_MESSAGE: isize = 10008;
pub const MISSING_ACCESS: isize = 50001;
pub const MISSING_PERMISSIONS: isize = 50013;

#[derive(Debug, Clone, Error)]
pub enum SendError {
    #[error("missing access or permissions (code {0})")]
    MissingPermissions(isize),
    #[error("unknown channel or message (code {0})")]
    UnknownResource(isize),
    #[error("request failed: {0}")]
    Failed(String),
}

impl SendError {
    pub fn from_code(code: isize, message: &str) -> Self {
        match code {
            MISSING_ACCESS | MISSING_PERMISSIONS => SendError::MissingPermissions(code),
            UNKNOWN_CHANNEL | UNKNOWN_MESSAGE => SendError::UnknownResource(code),
            _ => SendError::Failed(format!("{message} (code {code})")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage {
    pub message_id: i64,
    pub channel_id: i64,
}

/// Outbound chat operations the giveaway engine needs.
#[async_trait::async_trait]
pub trait Messenger: Send + Sync {
    async fn send_message(
        &self,
        channel_id: i64,
        message: &OutgoingMessage,
    ) -> Result<SentMessage, SendError>;

    async fn edit_message(
        &self,
        channel_id: i64,
        message_id: i64,
        message: &OutgoingMessage,
    ) -> Result<(), SendError>;

    async fn delete_message(&self, channel_id: i64, message_id: i64) -> Result<(), SendError>;
}

/// Somewhere to park manifests so they outlive the giveaway record.
#[async_trait::async_trait]
pub trait BlobUploader: Send + Sync {
    /// Returns the retrievable location of the upload, or `None` when the
    /// upload failed.
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Option<String>;

    async fn download(&self, key: &str, filename: &str) -> Result<Vec<u8>, SendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_discord_codes_to_failure_kinds() {
        assert!(matches!(
            SendError::from_code(50013, "Missing Permissions"),
            SendError::MissingPermissions(50013)
        ));
        assert!(matches!(
            SendError::from_code(50001, "Missing Access"),
            SendError::MissingPermissions(50001)
        ));
        assert!(matches!(
            SendError::from_code(10008, "Unknown Message"),
            SendError::UnknownResource(10008)
        ));
        assert!(matches!(
            SendError::from_code(30003, "Maximum number of pins reached"),
            SendError::Failed(_)
        ));
    }
}
