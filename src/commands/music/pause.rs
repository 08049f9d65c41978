use super::{guild_id, respond};
use crate::{CommandResult, Context};

/// Pauses the currently played song.
#[poise::command(prefix_command, slash_command, guild_only, category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    let result = ctx.data().voice.pause(guild_id).await;
    respond(ctx, result).await
}

/// Resumes the currently played song.
#[poise::command(prefix_command, slash_command, guild_only, category = "Music")]
pub async fn resume(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    let result = ctx.data().voice.resume(guild_id).await;
    respond(ctx, result).await
}
