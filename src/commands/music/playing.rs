use super::{guild_id, respond};
use crate::{CommandResult, Context};

/// Shows info about the currently played song.
#[poise::command(prefix_command, slash_command, guild_only, category = "Music")]
pub async fn playing(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    let result = ctx.data().voice.now_playing(guild_id).await;
    respond(ctx, result).await
}
