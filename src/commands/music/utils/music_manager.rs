//! Songbird implementation of the voice backend.

use async_trait::async_trait;
use ::serenity::all::{Channel, ChannelId, ChannelType, Context, GuildId, Http, UserId};
use songbird::input::{AuxMetadata, Compose, File, Input, YoutubeDl};
use songbird::tracks::{Track, TrackHandle};
use songbird::{Call, Event, Songbird, TrackEvent};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, oneshot};
use tracing::{debug, error, info};
use url::Url;

use super::event_handlers::TrackEndNotifier;
use crate::voice::{
    AudioSource, Playback, TrackControl, TrackMetadata, VoiceBackend, VoiceConnection, VoiceError,
    VoiceResult, stop_on_error,
};

/// Joins voice channels through songbird and resolves sources through yt-dlp.
pub struct SongbirdBackend {
    manager: Arc<Songbird>,
    http: Arc<Http>,
    http_client: reqwest::Client,
}

impl SongbirdBackend {
    pub fn new(
        manager: Arc<Songbird>,
        http: Arc<Http>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            manager,
            http,
            http_client,
        }
    }

    async fn is_voice_channel(&self, channel_id: ChannelId) -> VoiceResult<bool> {
        let channel = channel_id
            .to_channel(&self.http)
            .await
            .map_err(|e| VoiceError::JoinFailed(e.to_string()))?;

        Ok(match channel {
            Channel::Guild(channel) => {
                matches!(channel.kind, ChannelType::Voice | ChannelType::Stage)
            }
            _ => false,
        })
    }
}

#[async_trait]
impl VoiceBackend for SongbirdBackend {
    type Connection = SongbirdConnection;

    async fn join(&self, guild_id: GuildId, channel_id: ChannelId) -> VoiceResult<SongbirdConnection> {
        if !self.is_voice_channel(channel_id).await? {
            return Err(VoiceError::NotAVoiceChannel);
        }

        let call = self.manager.join(guild_id, channel_id).await.map_err(|e| {
            error!(
                "Failed to join voice channel {} for guild {}: {}",
                channel_id, guild_id, e
            );
            VoiceError::JoinFailed(e.to_string())
        })?;

        Ok(SongbirdConnection {
            manager: Arc::clone(&self.manager),
            guild_id,
            call,
        })
    }

    async fn resolve(&self, query: &str) -> VoiceResult<AudioSource<Input>> {
        debug!("Resolving audio source from query: {}", query);
        let mut source = if Url::parse(query).is_ok() {
            YoutubeDl::new(self.http_client.clone(), query.to_string())
        } else {
            YoutubeDl::new_search(self.http_client.clone(), query.to_string())
        };

        // Fetching metadata up front surfaces lookup and network failures here
        // rather than once the entry reaches the front of the queue.
        let aux = source
            .aux_metadata()
            .await
            .map_err(|e| VoiceError::ResolutionFailed(e.to_string()))?;
        let metadata = metadata_from_aux(aux, query);
        info!("Resolved '{}' to '{}'", query, metadata.title);

        Ok(AudioSource {
            metadata,
            stream: source.into(),
        })
    }

    async fn open_local(&self, path: &Path) -> VoiceResult<AudioSource<Input>> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(VoiceError::FileNotFound(path.display().to_string()));
        }

        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(AudioSource {
            metadata: TrackMetadata {
                title,
                uploader: Some("the clip library".to_string()),
                ..Default::default()
            },
            stream: File::new(path.to_path_buf()).into(),
        })
    }
}

fn metadata_from_aux(aux: AuxMetadata, query: &str) -> TrackMetadata {
    TrackMetadata {
        title: aux.title.unwrap_or_else(|| query.to_string()),
        uploader: aux.channel.or(aux.artist),
        duration: aux.duration,
        url: aux.source_url,
    }
}

/// One guild's songbird call
pub struct SongbirdConnection {
    manager: Arc<Songbird>,
    guild_id: GuildId,
    call: Arc<Mutex<Call>>,
}

#[async_trait]
impl VoiceConnection for SongbirdConnection {
    type Source = Input;
    type Track = SongbirdTrack;

    async fn play(&self, source: Input, volume: f32) -> VoiceResult<Playback<SongbirdTrack>> {
        let handle = {
            let mut call = self.call.lock().await;
            call.play(Track::new(source).volume(volume))
        };
        debug!("Track handle created for guild {}", self.guild_id);

        let (tx, ended) = oneshot::channel();
        let finished = Arc::new(AtomicBool::new(false));
        let notifier = TrackEndNotifier::new(self.guild_id, tx, Arc::clone(&finished));

        let track = stop_on_error(SongbirdTrack { handle, finished }, |track| {
            for event in [TrackEvent::End, TrackEvent::Error] {
                track
                    .handle
                    .add_event(Event::Track(event), notifier.clone())
                    .map_err(|e| VoiceError::Playback(e.to_string()))?;
            }
            Ok(())
        })?;

        Ok(Playback { track, ended })
    }

    async fn move_to(&self, channel_id: ChannelId) -> VoiceResult<()> {
        self.manager
            .join(self.guild_id, channel_id)
            .await
            .map(|_| ())
            .map_err(|e| VoiceError::JoinFailed(e.to_string()))
    }

    async fn disconnect(&self) -> VoiceResult<()> {
        self.manager
            .remove(self.guild_id)
            .await
            .map_err(|e| VoiceError::JoinFailed(e.to_string()))
    }
}

/// A songbird track plus the flag its end-of-track handler sets
pub struct SongbirdTrack {
    handle: TrackHandle,
    finished: Arc<AtomicBool>,
}

impl TrackControl for SongbirdTrack {
    fn stop(&self) -> VoiceResult<()> {
        self.handle
            .stop()
            .map_err(|e| VoiceError::Playback(e.to_string()))
    }

    fn pause(&self) -> VoiceResult<()> {
        self.handle
            .pause()
            .map_err(|e| VoiceError::Playback(e.to_string()))
    }

    fn resume(&self) -> VoiceResult<()> {
        self.handle
            .play()
            .map_err(|e| VoiceError::Playback(e.to_string()))
    }

    fn set_volume(&self, volume: f32) -> VoiceResult<()> {
        self.handle
            .set_volume(volume)
            .map_err(|e| VoiceError::Playback(e.to_string()))
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

/// Get the voice channel ID that the user is currently in
pub fn get_user_voice_channel(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
) -> Option<ChannelId> {
    let guild = ctx.cache.guild(guild_id)?;
    guild.voice_states.get(&user_id)?.channel_id
}
