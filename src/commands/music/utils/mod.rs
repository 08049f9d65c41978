// Songbird and serenity adapters for the voice state machine
pub mod event_handlers;
pub mod music_manager;
pub mod notifier;

pub use music_manager::{SongbirdBackend, get_user_voice_channel};
pub use notifier::ChannelNotifier;
