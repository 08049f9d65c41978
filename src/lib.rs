//! Hector, a Discord bot that plays audio in voice channels, keeps quotes
//! and posts the odd reaction GIF.

#[cfg(feature = "music")]
use std::sync::Arc;
use std::sync::LazyLock;

pub mod commands;
pub mod config;
pub mod utils;
pub mod voice;

use config::Config;
use utils::quote_store::QuoteStore;

#[cfg(feature = "music")]
use commands::music::utils::SongbirdBackend;
#[cfg(feature = "music")]
use voice::VoiceStateRegistry;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;
pub type Command = poise::Command<Data, Error>;

/// Shared client for plain HTTP downloads and yt-dlp lookups
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// State shared by every command invocation
pub struct Data {
    pub config: Config,
    pub quotes: QuoteStore,
    #[cfg(feature = "music")]
    pub voice: Arc<VoiceStateRegistry<SongbirdBackend>>,
}

/// Log failed commands and tell the user what went wrong.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to start the bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command '{}': {}", ctx.command().name, error);
            if let Err(e) = ctx
                .say(format!("An error occurred while processing this request: {}", error))
                .await
            {
                tracing::warn!("Failed to report command error: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}
