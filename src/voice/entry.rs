use serenity::model::id::{ChannelId, UserId};
use std::fmt;
use std::time::Duration;

/// Represents metadata for a track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub uploader: Option<String>,
    pub duration: Option<Duration>,
    pub url: Option<String>,
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self {
            title: "Unknown Track".to_string(),
            uploader: None,
            duration: None,
            url: None,
        }
    }
}

/// An opened audio stream together with what we know about it
pub struct AudioSource<S> {
    pub metadata: TrackMetadata,
    pub stream: S,
}

/// The user who asked for an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub id: UserId,
    pub display_name: String,
}

/// Everything about a queued entry except the stream itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetails {
    pub requester: Requester,
    pub notify_channel: ChannelId,
    pub metadata: TrackMetadata,
}

impl fmt::Display for EntryDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "*{}* uploaded by {} and requested by {}",
            self.metadata.title,
            self.metadata.uploader.as_deref().unwrap_or("unknown"),
            self.requester.display_name
        )?;
        if let Some(duration) = self.metadata.duration.filter(|d| !d.is_zero()) {
            let seconds = duration.as_secs();
            write!(f, " [length: {}m {}s]", seconds / 60, seconds % 60)?;
        }
        Ok(())
    }
}

/// One queued, playable unit of audio.
///
/// The stream is moved out when playback starts, so an entry can only ever be played once.
pub struct PlaybackEntry<S> {
    pub details: EntryDetails,
    source: S,
}

impl<S> PlaybackEntry<S> {
    pub fn new(requester: Requester, notify_channel: ChannelId, source: AudioSource<S>) -> Self {
        Self {
            details: EntryDetails {
                requester,
                notify_channel,
                metadata: source.metadata,
            },
            source: source.stream,
        }
    }

    pub fn into_parts(self) -> (EntryDetails, S) {
        (self.details, self.source)
    }
}
