use tracing::info;

use super::{author_voice_channel, origin, respond};
use crate::{CommandResult, Context};

/// Plays a song.
///
/// If there is a song currently playing, the new one is queued until the
/// songs before it are done. Anything that is not a URL is searched for.
#[poise::command(prefix_command, slash_command, guild_only, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[description = "URL or search query"]
    #[rest]
    query: String,
) -> CommandResult {
    info!("Received play command with query: {}", query);
    let origin = origin(ctx)?;
    let channel = author_voice_channel(ctx);

    // Resolving the source can take a while
    ctx.defer().await?;

    let result = ctx.data().voice.play(&origin, channel, &query).await;
    respond(ctx, result).await
}
