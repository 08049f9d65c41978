use dashmap::DashMap;
use futures::future::join_all;
use serenity::model::id::{ChannelId, GuildId, UserId};
use serenity::model::mention::Mentionable;
use std::sync::Arc;
use tracing::{info, warn};

use super::backend::{Notifier, SourceOf, VoiceBackend, VoiceConnection};
use super::clips::ClipLibrary;
use super::entry::{AudioSource, PlaybackEntry, Requester};
use super::error::{VoiceError, VoiceResult};
use super::guild_state::GuildVoiceState;

/// Who issued a command, and from where
#[derive(Debug, Clone)]
pub struct CommandOrigin {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub requester: Requester,
}

type StateOf<B> = GuildVoiceState<<B as VoiceBackend>::Connection>;

/// Per-guild voice states, created on demand and destroyed explicitly.
///
/// Every user-facing voice command goes through here. Operations return the
/// reply text for the invoking channel; see [`super::reply_text`] for errors.
pub struct VoiceStateRegistry<B: VoiceBackend> {
    backend: Arc<B>,
    notifier: Arc<dyn Notifier>,
    clips: ClipLibrary,
    volume: f32,
    states: DashMap<GuildId, Arc<StateOf<B>>>,
}

impl<B: VoiceBackend> VoiceStateRegistry<B> {
    /// `volume` is the multiplier new entries start playing at.
    pub fn new(backend: Arc<B>, notifier: Arc<dyn Notifier>, clips: ClipLibrary, volume: f32) -> Self {
        Self {
            backend,
            notifier,
            clips,
            volume,
            states: DashMap::new(),
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Get the state for this guild, starting a playback loop if there was none.
    pub fn get_or_create(&self, guild_id: GuildId) -> Arc<StateOf<B>> {
        let entry = self.states.entry(guild_id).or_insert_with(|| {
            GuildVoiceState::start(guild_id, Arc::clone(&self.notifier), self.volume)
        });
        Arc::clone(entry.value())
    }

    pub fn get(&self, guild_id: GuildId) -> Option<Arc<StateOf<B>>> {
        self.states.get(&guild_id).map(|state| Arc::clone(state.value()))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Tear down the state for this guild. Returns whether there was one.
    pub async fn remove(&self, guild_id: GuildId) -> bool {
        match self.states.remove(&guild_id) {
            Some((_, state)) => {
                state.shutdown().await;
                true
            }
            None => false,
        }
    }

    /// Tear down every guild, used when the process shuts down.
    pub async fn shutdown_all(&self) {
        let guilds: Vec<GuildId> = self.states.iter().map(|state| *state.key()).collect();
        info!("Shutting down voice state for {} guild(s)", guilds.len());
        join_all(guilds.into_iter().map(|guild_id| self.remove(guild_id))).await;
    }

    /// Join the given voice channel.
    pub async fn join(&self, guild_id: GuildId, channel_id: ChannelId) -> VoiceResult<String> {
        let state = self.get_or_create(guild_id);
        if state.connection().await.is_some() {
            return Err(VoiceError::AlreadyInVoiceChannel);
        }

        let connection = self.backend.join(guild_id, channel_id).await?;
        state.attach(connection).await?;
        info!("Joined channel {} in guild {}", channel_id, guild_id);

        Ok(format!("Ready to play audio in {}", channel_id.mention()))
    }

    /// Join the author's voice channel, or move there if already connected.
    pub async fn summon(
        &self,
        guild_id: GuildId,
        author_channel: Option<ChannelId>,
    ) -> VoiceResult<String> {
        let channel_id = author_channel.ok_or(VoiceError::NotInVoiceChannel)?;
        let state = self.get_or_create(guild_id);

        match state.connection().await {
            Some(connection) => {
                connection.move_to(channel_id).await?;
                info!("Moved to channel {} in guild {}", channel_id, guild_id);
            }
            None => {
                let connection = self.backend.join(guild_id, channel_id).await?;
                state.attach(connection).await?;
                info!("Joined channel {} in guild {}", channel_id, guild_id);
            }
        }

        Ok(format!("Summoned to {}", channel_id.mention()))
    }

    /// Resolve `query` and queue it, joining the author's channel first if needed.
    pub async fn play(
        &self,
        origin: &CommandOrigin,
        author_channel: Option<ChannelId>,
        query: &str,
    ) -> VoiceResult<String> {
        let state = self.get_or_create(origin.guild_id);
        self.ensure_connected(&state, author_channel).await?;

        let source = self.backend.resolve(query).await.inspect_err(|e| {
            warn!(
                "Failed to resolve '{}' for guild {}: {}",
                query, origin.guild_id, e
            )
        })?;

        Ok(self.enqueue(&state, origin, source).await)
    }

    /// Queue one of the bundled clips through the same queue as everything else.
    pub async fn play_clip(
        &self,
        origin: &CommandOrigin,
        author_channel: Option<ChannelId>,
        clip: &str,
    ) -> VoiceResult<String> {
        let path = self.clips.path(clip)?;
        let state = self.get_or_create(origin.guild_id);
        self.ensure_connected(&state, author_channel).await?;

        let source = self.backend.open_local(&path).await?;
        Ok(self.enqueue(&state, origin, source).await)
    }

    pub async fn set_volume(&self, guild_id: GuildId, percent: u32) -> VoiceResult<String> {
        let state = self.get(guild_id).ok_or(VoiceError::NotPlaying)?;
        let applied = state.set_volume(percent).await?;
        Ok(format!("Set the volume to {}%", applied))
    }

    pub async fn pause(&self, guild_id: GuildId) -> VoiceResult<String> {
        let state = self.get(guild_id).ok_or(VoiceError::NotPlaying)?;
        state.pause().await?;
        Ok("Paused.".to_string())
    }

    pub async fn resume(&self, guild_id: GuildId) -> VoiceResult<String> {
        let state = self.get(guild_id).ok_or(VoiceError::NotPlaying)?;
        state.resume().await?;
        Ok("Resumed.".to_string())
    }

    /// Vote to skip the current entry. Its requester skips straight away.
    pub async fn vote_skip(&self, guild_id: GuildId, voter: UserId) -> VoiceResult<String> {
        let state = self.get(guild_id).ok_or(VoiceError::NotPlaying)?;
        let outcome = state.vote_skip(voter).await?;
        Ok(outcome.to_string())
    }

    pub async fn now_playing(&self, guild_id: GuildId) -> VoiceResult<String> {
        let Some(state) = self.get(guild_id) else {
            return Ok("Not playing anything.".to_string());
        };

        match state.current_details().await {
            Some(details) => {
                let (votes, needed) = state.skip_vote_count().await;
                let mut reply = format!("Now playing {} [skips: {}/{}]", details, votes, needed);
                if let Some(url) = &details.metadata.url {
                    reply.push_str(&format!(" <{}>", url));
                }
                Ok(reply)
            }
            None => Ok("Not playing anything.".to_string()),
        }
    }

    /// Stop playing, clear the queue and leave the voice channel.
    pub async fn stop(&self, guild_id: GuildId) -> VoiceResult<String> {
        if let Some(state) = self.get(guild_id) {
            if state.is_playing().await {
                state.skip().await;
            }
        }
        self.remove(guild_id).await;
        Ok("Stopped playback and cleared the queue.".to_string())
    }

    /// Leave the voice channel, stopping whatever is playing.
    pub async fn leave(&self, guild_id: GuildId) -> VoiceResult<String> {
        let state = self.get(guild_id).ok_or(VoiceError::NotConnected)?;
        if state.is_playing().await {
            state.skip().await;
        }
        self.remove(guild_id).await;
        Ok("Left the voice channel.".to_string())
    }

    async fn ensure_connected(
        &self,
        state: &StateOf<B>,
        author_channel: Option<ChannelId>,
    ) -> VoiceResult<()> {
        if state.connection().await.is_some() {
            return Ok(());
        }

        let channel_id = author_channel.ok_or(VoiceError::NotInVoiceChannel)?;
        let connection = self.backend.join(state.guild_id(), channel_id).await?;
        match state.attach(connection).await {
            // Someone else joined in the meantime.
            Ok(_) | Err(VoiceError::AlreadyInVoiceChannel) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn enqueue(
        &self,
        state: &StateOf<B>,
        origin: &CommandOrigin,
        source: AudioSource<SourceOf<B>>,
    ) -> String {
        let entry = PlaybackEntry::new(origin.requester.clone(), origin.channel_id, source);
        let reply = format!("Enqueued {}", entry.details);
        let position = state.enqueue(entry).await;
        info!(
            "Queued entry at position {} for guild {}",
            position, origin.guild_id
        );
        reply
    }
}
