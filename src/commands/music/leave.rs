use super::{guild_id, respond};
use crate::{CommandResult, Context};

/// Leave the voice channel
#[poise::command(prefix_command, slash_command, guild_only, category = "Music")]
pub async fn leave(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    let result = ctx.data().voice.leave(guild_id).await;
    respond(ctx, result).await
}
