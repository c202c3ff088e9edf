use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicI64, Ordering},
        Mutex,
    },
};

use super::{message::OutgoingMessage, BlobUploader, Messenger, SendError, SentMessage};

/// Records every call and fails on demand.
pub struct FakeMessenger {
    next_id: AtomicI64,
    pub sent: Mutex<Vec<(i64, OutgoingMessage)>>,
    pub edited: Mutex<Vec<(i64, OutgoingMessage)>>,
    pub deleted: Mutex<Vec<i64>>,
    send_failure: Mutex<Option<SendError>>,
    fail_edits: AtomicBool,
    fail_deletes: AtomicBool,
}

impl FakeMessenger {
    pub fn new() -> Self {
        FakeMessenger {
            next_id: AtomicI64::new(1_000),
            sent: Mutex::new(vec![]),
            edited: Mutex::new(vec![]),
            deleted: Mutex::new(vec![]),
            send_failure: Mutex::new(None),
            fail_edits: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
        }
    }

    pub fn fail_sends_with(&self, err: SendError) {
        *self.send_failure.lock().unwrap() = Some(err);
    }

    pub fn fail_edits(&self) {
        self.fail_edits.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_sent(&self) -> Option<OutgoingMessage> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .map(|(_, message)| message.clone())
    }
}

#[async_trait::async_trait]
impl Messenger for FakeMessenger {
    async fn send_message(
        &self,
        channel_id: i64,
        message: &OutgoingMessage,
    ) -> Result<SentMessage, SendError> {
        if let Some(err) = self.send_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.sent.lock().unwrap().push((channel_id, message.clone()));
        Ok(SentMessage {
            message_id: self.next_id.fetch_add(1, Ordering::SeqCst),
            channel_id,
        })
    }

    async fn edit_message(
        &self,
        _channel_id: i64,
        message_id: i64,
        message: &OutgoingMessage,
    ) -> Result<(), SendError> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(SendError::Failed("edit rejected".to_string()));
        }
        self.edited.lock().unwrap().push((message_id, message.clone()));
        Ok(())
    }

    async fn delete_message(&self, _channel_id: i64, message_id: i64) -> Result<(), SendError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(SendError::UnknownResource(super::UNKNOWN_MESSAGE));
        }
        self.deleted.lock().unwrap().push(message_id);
        Ok(())
    }
}

/// Keeps uploads in memory under a CDN-shaped URL.
pub struct FakeUploader {
    next_id: AtomicI64,
    pub files: Mutex<HashMap<String, Vec<u8>>>,
    fail_uploads: AtomicBool,
}

impl FakeUploader {
    pub fn new() -> Self {
        FakeUploader {
            next_id: AtomicI64::new(5_000),
            files: Mutex::new(HashMap::new()),
            fail_uploads: AtomicBool::new(false),
        }
    }

    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn put(&self, key: &str, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(key.to_string(), bytes);
    }
}

#[async_trait::async_trait]
impl BlobUploader for FakeUploader {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Option<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return None;
        }
        let key = format!("900/{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.files.lock().unwrap().insert(key.clone(), bytes);
        Some(format!(
            "https://cdn.discordapp.com/attachments/{key}/{filename}?ex=1"
        ))
    }

    async fn download(&self, key: &str, _filename: &str) -> Result<Vec<u8>, SendError> {
        self.files
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| SendError::UnknownResource(super::UNKNOWN_MESSAGE))
    }
}
