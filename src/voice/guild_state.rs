use serenity::model::id::{GuildId, UserId};
use std::collections::VecDeque;
use std::sync::{Arc, OnceLock};
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::backend::{Notifier, Playback, StreamEnd, TrackControl, VoiceConnection};
use super::entry::{EntryDetails, PlaybackEntry};
use super::error::{VoiceError, VoiceResult};
use super::skip_votes::{SkipVotes, VoteOutcome};

/// Highest volume accepted, in percent.
pub const MAX_VOLUME_PERCENT: u32 = 200;

/// Where the playback loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Loading,
    Playing,
}

/// The entry being played and the handle to its stream once it has started.
struct Current<T> {
    details: EntryDetails,
    track: Option<T>,
    // Skip requested before the stream started.
    stop_requested: bool,
}

struct Inner<C: VoiceConnection> {
    connection: Option<Arc<C>>,
    queue: VecDeque<PlaybackEntry<C::Source>>,
    current: Option<Current<C::Track>>,
    skip_votes: SkipVotes,
    state: PlayerState,
}

impl<C: VoiceConnection> Inner<C> {
    fn playing_track(&self) -> Option<&C::Track> {
        if self.connection.is_none() {
            return None;
        }
        self.current
            .as_ref()
            .and_then(|current| current.track.as_ref())
            .filter(|track| !track.is_finished())
    }

    fn skip(&mut self, guild_id: GuildId) -> bool {
        self.skip_votes.clear();
        let Some(current) = self.current.as_mut() else {
            return false;
        };

        match &current.track {
            Some(track) => {
                if let Err(e) = track.stop() {
                    warn!("Failed to stop track for guild {}: {}", guild_id, e);
                }
            }
            None => current.stop_requested = true,
        }
        true
    }
}

/// Voice state for one guild: its connection, its queue and the task that plays it.
///
/// The playback loop is the only writer of `current`. Command handlers enqueue,
/// vote and control the running track; every mutation goes through the same mutex.
pub struct GuildVoiceState<C: VoiceConnection> {
    guild_id: GuildId,
    inner: Mutex<Inner<C>>,
    queue_ready: Notify,
    notifier: Arc<dyn Notifier>,
    volume: f32,
    playback_task: OnceLock<JoinHandle<()>>,
}

impl<C: VoiceConnection> GuildVoiceState<C> {
    /// Create the state for `guild_id` and start its playback loop.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(guild_id: GuildId, notifier: Arc<dyn Notifier>, volume: f32) -> Arc<Self> {
        let state = Arc::new(Self {
            guild_id,
            inner: Mutex::new(Inner {
                connection: None,
                queue: VecDeque::new(),
                current: None,
                skip_votes: SkipVotes::default(),
                state: PlayerState::Idle,
            }),
            queue_ready: Notify::new(),
            notifier,
            volume,
            playback_task: OnceLock::new(),
        });

        info!("Starting playback loop for guild {}", guild_id);
        let task = tokio::spawn(Arc::clone(&state).run());
        let _ = state.playback_task.set(task);

        state
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    pub async fn connection(&self) -> Option<Arc<C>> {
        self.inner.lock().await.connection.clone()
    }

    /// Store a freshly joined connection.
    pub async fn attach(&self, connection: C) -> VoiceResult<Arc<C>> {
        let mut inner = self.inner.lock().await;
        if inner.connection.is_some() {
            return Err(VoiceError::AlreadyInVoiceChannel);
        }
        let connection = Arc::new(connection);
        inner.connection = Some(Arc::clone(&connection));
        Ok(connection)
    }

    /// Append an entry to the queue. Returns its position, 1 being next up.
    pub async fn enqueue(&self, entry: PlaybackEntry<C::Source>) -> usize {
        let position = {
            let mut inner = self.inner.lock().await;
            debug!(
                "Enqueueing '{}' for guild {}",
                entry.details.metadata.title, self.guild_id
            );
            inner.queue.push_back(entry);
            inner.queue.len()
        };
        self.queue_ready.notify_one();
        position
    }

    /// Force-stop the current entry. Queued entries are left alone.
    pub async fn skip(&self) -> bool {
        self.inner.lock().await.skip(self.guild_id)
    }

    pub async fn vote_skip(&self, voter: UserId) -> VoiceResult<VoteOutcome> {
        let mut inner = self.inner.lock().await;
        if inner.playing_track().is_none() {
            return Err(VoiceError::NotPlaying);
        }
        let requester = match inner.current.as_ref() {
            Some(current) => current.details.requester.id,
            None => return Err(VoiceError::NotPlaying),
        };

        let outcome = inner.skip_votes.cast(voter, requester)?;
        if outcome.skips() {
            info!(
                "Skipping current entry for guild {} ({:?})",
                self.guild_id, outcome
            );
            inner.skip(self.guild_id);
        }
        Ok(outcome)
    }

    /// Set the volume of the current entry. Returns the applied percentage.
    pub async fn set_volume(&self, percent: u32) -> VoiceResult<u32> {
        let percent = percent.min(MAX_VOLUME_PERCENT);
        let inner = self.inner.lock().await;
        let track = inner.playing_track().ok_or(VoiceError::NotPlaying)?;
        track.set_volume(percent as f32 / 100.0)?;
        Ok(percent)
    }

    pub async fn pause(&self) -> VoiceResult<()> {
        let inner = self.inner.lock().await;
        inner
            .playing_track()
            .ok_or(VoiceError::NotPlaying)?
            .pause()
    }

    pub async fn resume(&self) -> VoiceResult<()> {
        let inner = self.inner.lock().await;
        inner
            .playing_track()
            .ok_or(VoiceError::NotPlaying)?
            .resume()
    }

    /// True while connected with a current entry whose stream has not finished.
    pub async fn is_playing(&self) -> bool {
        self.inner.lock().await.playing_track().is_some()
    }

    pub async fn state(&self) -> PlayerState {
        self.inner.lock().await.state
    }

    pub async fn current_details(&self) -> Option<EntryDetails> {
        let inner = self.inner.lock().await;
        inner.current.as_ref().map(|current| current.details.clone())
    }

    pub async fn queue_len(&self) -> usize {
        self.inner.lock().await.queue.len()
    }

    /// Number of votes against the current entry and the number needed.
    pub async fn skip_vote_count(&self) -> (usize, usize) {
        let inner = self.inner.lock().await;
        (inner.skip_votes.count(), inner.skip_votes.threshold())
    }

    /// Cancel the playback loop, stop the current stream and disconnect.
    ///
    /// Best-effort: failures are logged and otherwise ignored.
    pub async fn shutdown(&self) {
        if let Some(task) = self.playback_task.get() {
            task.abort();
        }

        let (connection, track) = {
            let mut inner = self.inner.lock().await;
            inner.queue.clear();
            inner.skip_votes.clear();
            inner.state = PlayerState::Idle;
            let track = inner.current.take().and_then(|current| current.track);
            (inner.connection.take(), track)
        };

        if let Some(track) = track {
            if let Err(e) = track.stop() {
                debug!("Ignoring stop error during teardown for guild {}: {}", self.guild_id, e);
            }
        }

        if let Some(connection) = connection {
            if let Err(e) = connection.disconnect().await {
                debug!(
                    "Ignoring disconnect error during teardown for guild {}: {}",
                    self.guild_id, e
                );
            }
        }
        info!("Voice state torn down for guild {}", self.guild_id);
    }

    async fn run(self: Arc<Self>) {
        loop {
            let entry = self.next_entry().await;
            self.play_entry(entry).await;
            self.finish_current().await;
        }
    }

    /// Wait until the queue has an entry and take it.
    async fn next_entry(&self) -> PlaybackEntry<C::Source> {
        loop {
            {
                let mut inner = self.inner.lock().await;
                if let Some(entry) = inner.queue.pop_front() {
                    inner.state = PlayerState::Loading;
                    return entry;
                }
            }
            self.queue_ready.notified().await;
        }
    }

    async fn play_entry(&self, entry: PlaybackEntry<C::Source>) {
        let (details, source) = entry.into_parts();
        let channel = details.notify_channel;

        let connection = {
            let mut inner = self.inner.lock().await;
            inner.skip_votes.clear();
            inner.current = Some(Current {
                details: details.clone(),
                track: None,
                stop_requested: false,
            });
            inner.connection.clone()
        };

        let Some(connection) = connection else {
            warn!(
                "Dropping '{}' for guild {}: no voice connection",
                details.metadata.title, self.guild_id
            );
            self.notifier
                .send(channel, VoiceError::NotConnected.to_string())
                .await;
            return;
        };

        self.notifier
            .send(channel, format!("Now playing {}", details))
            .await;

        let Playback { track, ended } = match connection.play(source, self.volume).await {
            Ok(playback) => playback,
            Err(e) => {
                warn!(
                    "Failed to start '{}' for guild {}: {}",
                    details.metadata.title, self.guild_id, e
                );
                self.notifier
                    .send(channel, format!("Could not play {}: {}", details, e))
                    .await;
                return;
            }
        };

        {
            let mut inner = self.inner.lock().await;
            if let Some(current) = inner.current.as_mut() {
                if current.stop_requested {
                    if let Err(e) = track.stop() {
                        warn!("Failed to stop track for guild {}: {}", self.guild_id, e);
                    }
                }
                current.track = Some(track);
            }
            inner.state = PlayerState::Playing;
        }
        info!(
            "Playing '{}' for guild {}",
            details.metadata.title, self.guild_id
        );

        match ended.await {
            Ok(StreamEnd::Finished) | Err(_) => {
                debug!(
                    "Finished '{}' for guild {}",
                    details.metadata.title, self.guild_id
                );
            }
            Ok(StreamEnd::Errored(reason)) => {
                warn!(
                    "Stream error on '{}' for guild {}: {}",
                    details.metadata.title, self.guild_id, reason
                );
                self.notifier
                    .send(channel, format!("Playback of {} failed: {}", details, reason))
                    .await;
            }
        }
    }

    async fn finish_current(&self) {
        let mut inner = self.inner.lock().await;
        inner.current = None;
        inner.state = PlayerState::Idle;
    }
}
