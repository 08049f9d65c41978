use ::serenity::all::{ChannelId, Http};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::voice::Notifier;

/// Sends status messages to a text channel over the Discord HTTP API
pub struct ChannelNotifier {
    http: Arc<Http>,
}

impl ChannelNotifier {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn send(&self, channel_id: ChannelId, text: String) {
        if let Err(e) = channel_id.say(&self.http, text).await {
            warn!("Failed to send message to channel {}: {}", channel_id, e);
        }
    }
}
