use super::{guild_id, respond};
use crate::{CommandResult, Context};

/// Vote to skip a song. The song requester can automatically skip.
///
/// 3 skip votes are needed for the song to be skipped.
#[poise::command(prefix_command, slash_command, guild_only, category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    let result = ctx.data().voice.vote_skip(guild_id, ctx.author().id).await;
    respond(ctx, result).await
}
