//! Per-guild voice playback.
//!
//! A [`VoiceStateRegistry`] owns one [`GuildVoiceState`] per guild. Each state
//! runs its own playback loop that takes entries off a FIFO queue and streams
//! them one at a time through a [`VoiceConnection`]:
//!
//! `Idle` -> `Loading` (entry dequeued) -> `Playing` (stream started) -> `Idle`
//!
//! End of stream, a skip and a stream error all lead back to `Idle`, after
//! which the loop looks at the queue again. The loop runs until the guild's
//! state is removed from the registry.

pub mod backend;
pub mod clips;
pub mod entry;
pub mod error;
pub mod guild_state;
pub mod registry;
pub mod skip_votes;

pub use backend::{
    Notifier, Playback, SourceOf, StreamEnd, TrackControl, VoiceBackend, VoiceConnection,
    stop_on_error,
};
pub use clips::{CLIPS, ClipLibrary};
pub use entry::{AudioSource, EntryDetails, PlaybackEntry, Requester, TrackMetadata};
pub use error::{VoiceError, VoiceResult, reply_text};
pub use guild_state::{GuildVoiceState, MAX_VOLUME_PERCENT, PlayerState};
pub use registry::{CommandOrigin, VoiceStateRegistry};
pub use skip_votes::{SKIP_THRESHOLD, SkipVotes, VoteOutcome};
