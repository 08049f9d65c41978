use super::{guild_id, respond};
use crate::{CommandResult, Context};

/// Stops playing audio and leaves the voice channel.
///
/// This also clears the queue.
#[poise::command(prefix_command, slash_command, guild_only, category = "Music")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    let result = ctx.data().voice.stop(guild_id).await;
    respond(ctx, result).await
}
