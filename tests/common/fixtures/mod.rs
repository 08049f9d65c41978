//! Sample users, channels and entries shared by the tests

use hector::voice::{AudioSource, CommandOrigin, PlaybackEntry, Requester, TrackMetadata};
use serenity::model::id::{ChannelId, GuildId, UserId};

use super::mocks::FakeSource;

pub fn guild() -> GuildId {
    GuildId::new(100)
}

pub fn text_channel() -> ChannelId {
    ChannelId::new(200)
}

pub fn voice_channel() -> ChannelId {
    ChannelId::new(300)
}

pub fn other_voice_channel() -> ChannelId {
    ChannelId::new(301)
}

pub fn user(id: u64) -> Requester {
    Requester {
        id: UserId::new(id),
        display_name: format!("user{}", id),
    }
}

pub fn origin(requester: u64) -> CommandOrigin {
    CommandOrigin {
        guild_id: guild(),
        channel_id: text_channel(),
        requester: user(requester),
    }
}

pub fn metadata(title: &str) -> TrackMetadata {
    TrackMetadata {
        title: title.to_string(),
        uploader: Some("tester".to_string()),
        ..Default::default()
    }
}

/// A queue entry requested by `requester` whose stream plays fine.
pub fn entry(title: &str, requester: u64) -> PlaybackEntry<FakeSource> {
    PlaybackEntry::new(
        user(requester),
        text_channel(),
        AudioSource {
            metadata: metadata(title),
            stream: FakeSource::new(title),
        },
    )
}

/// A queue entry whose stream cannot be started.
pub fn broken_entry(title: &str, requester: u64) -> PlaybackEntry<FakeSource> {
    PlaybackEntry::new(
        user(requester),
        text_channel(),
        AudioSource {
            metadata: metadata(title),
            stream: FakeSource::broken(title),
        },
    )
}
