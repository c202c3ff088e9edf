use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use serenity::{
    all::Webhook,
    builder::{CreateAttachment, ExecuteWebhook},
    http::Http,
};
use tracing::{error, info, warn};

use super::{BlobUploader, SendError};

const ATTACHMENT_ROOT: &str = "https://cdn.discordapp.com/attachments";

/// Uploads manifests as webhook attachments, rotating across the configured
/// webhooks to spread their rate limits.
pub struct WebhookUploader {
    http: Arc<Http>,
    webhooks: Vec<Webhook>,
    index: AtomicUsize,
    client: reqwest::Client,
}

impl WebhookUploader {
    pub async fn connect(http: Arc<Http>, urls: &[String]) -> Result<Self, serenity::Error> {
        let mut webhooks = Vec::with_capacity(urls.len());
        for url in urls {
            webhooks.push(Webhook::from_url(&*http, url).await?);
        }
        info!("Connected {} manifest webhooks", webhooks.len());

        Ok(WebhookUploader {
            http,
            webhooks,
            index: AtomicUsize::new(0),
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait::async_trait]
impl BlobUploader for WebhookUploader {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Option<String> {
        if self.webhooks.is_empty() {
            warn!("No manifest webhooks are configured, skipping upload of {filename}");
            return None;
        }
        let webhook = &self.webhooks[self.index.fetch_add(1, Ordering::Relaxed) % self.webhooks.len()];

        let builder = ExecuteWebhook::new().add_file(CreateAttachment::bytes(bytes, filename));
        match webhook.execute(&*self.http, true, builder).await {
            Ok(Some(message)) => message
                .attachments
                .first()
                .map(|attachment| attachment.url.clone()),
            Ok(None) => None,
            Err(err) => {
                error!("Could not upload {filename}. Failed with error: {err:?}");
                None
            }
        }
    }

    async fn download(&self, key: &str, filename: &str) -> Result<Vec<u8>, SendError> {
        let url = format!("{ATTACHMENT_ROOT}/{key}/{filename}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| SendError::Failed(err.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| SendError::Failed(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}
