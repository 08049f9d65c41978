//! Seams between the playback state machine and the outside world.
//!
//! Production code plugs songbird and serenity in here; tests plug in fakes.

use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use std::path::Path;
use tokio::sync::oneshot;
use tracing::warn;

use super::entry::AudioSource;
use super::error::VoiceResult;

/// How a stream stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEnd {
    /// End of stream, or stopped on request.
    Finished,
    /// The transport gave up on the stream.
    Errored(String),
}

/// A stream that has started playing.
pub struct Playback<T> {
    pub track: T,
    /// Resolves once the stream ends for any reason. A dropped sender counts as finished.
    pub ended: oneshot::Receiver<StreamEnd>,
}

/// Control over a stream that is currently playing
pub trait TrackControl: Send + Sync + 'static {
    /// Force the stream to stop. The matching `Playback::ended` fires afterwards.
    fn stop(&self) -> VoiceResult<()>;
    fn pause(&self) -> VoiceResult<()>;
    fn resume(&self) -> VoiceResult<()>;
    /// `volume` is a multiplier, 1.0 being unchanged.
    fn set_volume(&self, volume: f32) -> VoiceResult<()>;
    fn is_finished(&self) -> bool;
}

/// Finish setting up a track that has already started, stopping it if that fails.
pub fn stop_on_error<T, F>(track: T, setup: F) -> VoiceResult<T>
where
    T: TrackControl,
    F: FnOnce(&T) -> VoiceResult<()>,
{
    match setup(&track) {
        Ok(()) => Ok(track),
        Err(e) => {
            if let Err(stop_err) = track.stop() {
                warn!("Failed to stop track after setup error: {}", stop_err);
            }
            Err(e)
        }
    }
}

/// A live voice connection for a single guild
#[async_trait]
pub trait VoiceConnection: Send + Sync + 'static {
    type Source: Send + 'static;
    type Track: TrackControl;

    async fn play(&self, source: Self::Source, volume: f32) -> VoiceResult<Playback<Self::Track>>;

    async fn move_to(&self, channel_id: ChannelId) -> VoiceResult<()>;

    async fn disconnect(&self) -> VoiceResult<()>;
}

/// Stream type produced by a backend's sources.
pub type SourceOf<B> = <<B as VoiceBackend>::Connection as VoiceConnection>::Source;

/// Voice transport and audio source resolution
#[async_trait]
pub trait VoiceBackend: Send + Sync + 'static {
    type Connection: VoiceConnection;

    /// Join `channel_id`, failing with `NotAVoiceChannel` when it cannot carry audio.
    async fn join(&self, guild_id: GuildId, channel_id: ChannelId)
    -> VoiceResult<Self::Connection>;

    /// Resolve a URL or search query into a playable source.
    async fn resolve(&self, query: &str) -> VoiceResult<AudioSource<SourceOf<Self>>>;

    /// Open a bundled audio file.
    async fn open_local(&self, path: &Path) -> VoiceResult<AudioSource<SourceOf<Self>>>;
}

/// Where status messages go
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Fire-and-forget: failures are logged by the implementation, never returned.
    async fn send(&self, channel_id: ChannelId, text: String);
}
