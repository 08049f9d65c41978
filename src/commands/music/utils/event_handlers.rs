use ::serenity::all::GuildId;
use async_trait::async_trait;
use songbird::tracks::PlayMode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::voice::StreamEnd;

/// Event handler for when a track ends or fails.
///
/// Registered for both `TrackEvent::End` and `TrackEvent::Error`; whichever
/// fires first reports to the playback loop, later events are ignored.
#[derive(Clone)]
pub struct TrackEndNotifier {
    guild_id: GuildId,
    ended: Arc<Mutex<Option<oneshot::Sender<StreamEnd>>>>,
    finished: Arc<AtomicBool>,
}

impl TrackEndNotifier {
    pub fn new(
        guild_id: GuildId,
        ended: oneshot::Sender<StreamEnd>,
        finished: Arc<AtomicBool>,
    ) -> Self {
        Self {
            guild_id,
            ended: Arc::new(Mutex::new(Some(ended))),
            finished,
        }
    }

    fn report(&self, outcome: StreamEnd) {
        self.finished.store(true, Ordering::Release);

        let sender = match self.ended.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(sender) = sender {
            // The loop may already be gone if the guild was torn down.
            let _ = sender.send(outcome);
        }
    }
}

#[async_trait]
impl songbird::EventHandler for TrackEndNotifier {
    async fn act(&self, ctx: &songbird::EventContext<'_>) -> Option<songbird::Event> {
        if let songbird::EventContext::Track(tracks) = ctx {
            let outcome = tracks
                .iter()
                .find_map(|(state, _)| match &state.playing {
                    PlayMode::Errored(err) => Some(StreamEnd::Errored(format!("{:?}", err))),
                    _ => None,
                })
                .unwrap_or(StreamEnd::Finished);

            match &outcome {
                StreamEnd::Finished => info!("Track ended for guild {}", self.guild_id),
                StreamEnd::Errored(reason) => {
                    warn!("Track errored for guild {}: {}", self.guild_id, reason)
                }
            }
            self.report(outcome);
        }
        None
    }
}
